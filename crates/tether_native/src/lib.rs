//! # tether_native - Native core boundary
//!
//! Everything the scripting layer knows about the native core: opaque
//! handles, the C ABI function table, a safe trait over it, fixed-layout
//! mirrors of engine state, and a headless core that implements the whole
//! contract in-process.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │  Native core    │────▶│  NativeApi      │  #[repr(C)] table of
//! │  (game.so)      │     │  (C ABI)        │  extern "C" entry points
//! └─────────────────┘     └────────┬────────┘
//!                                  │
//!                                  ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │  HeadlessCore   │     │  FfiBoundary    │
//! │  (in-process)   │     │  (over a table) │
//! └────────┬────────┘     └────────┬────────┘
//!          │                       │
//!          └──────────┬────────────┘
//!                     ▼
//!            ┌─────────────────┐
//!            │ dyn NativeBoundary │ ◀── used by tether_script
//!            └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tether_native::{FfiBoundary, NativeBoundary, NativeLibrary};
//!
//! let library = Arc::new(NativeLibrary::load("libgame_core.so")?);
//! let boundary = FfiBoundary::from_library(library);
//! let manager = boundary.asset_manager()?;
//! let exists = boundary.asset_exists(manager, "hero")?;
//! ```

mod boundary;
mod error;
mod ffi_boundary;
mod handle;
mod headless;
mod library;

pub mod ffi;
pub mod mirror;

pub use boundary::NativeBoundary;
pub use error::{NativeError, Result};
pub use ffi::{
    AssetKind, AudioCommand, BufferKind, FfiScriptHooks, Link, MemberKind, NativeApi, Property,
    StateRegion, ValueType, DEFAULT_API_SYMBOL, TETHER_NATIVE_API_VERSION,
};
pub use ffi_boundary::FfiBoundary;
pub use handle::NativeHandle;
pub use headless::{HeadlessCore, ObjectKind, Playback};
pub use library::{LibraryInfo, NativeLibrary};
pub use mirror::{KeyboardState, MirrorReader, StructMirror, WindowState, KEY_COUNT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::boundary::NativeBoundary;
    pub use crate::error::{NativeError, Result};
    pub use crate::ffi::{AssetKind, StateRegion};
    pub use crate::handle::NativeHandle;
    pub use crate::mirror::{KeyboardState, StructMirror, WindowState};
}
