//! # tether_script - Scripting object model
//!
//! The scripting-facing side of the engine: named assets, scenes and the
//! objects in them, engine state snapshots and the scripts that drive them.
//! Every object here is a thin proxy over a native handle; the native core
//! owns all state.
//!
//! ## Overview
//!
//! - [`AssetRegistry`] creates and finds assets by name through the native
//!   asset manager. A name maps to at most one native object.
//! - [`asset`] holds the typed proxies: [`Visual`], [`Shader`],
//!   [`MeshBuffer`], [`Texture`], [`Audio`] and [`Text`].
//! - [`Scene`] composes [`GameObject`]s, [`Camera`]s and the scene's
//!   [`AudioListener`]; [`SceneDirector`] enters and retires scenes.
//! - [`StateHook`] decodes window and keyboard state on demand.
//! - [`Runtime`] dispatches [`Script`]s once per frame.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tether_native::HeadlessCore;
//! use tether_script::prelude::*;
//!
//! let ctx = Context::new(Arc::new(HeadlessCore::new()))?;
//! let mut runtime = Runtime::new(ctx, RuntimeConfig::default());
//!
//! runtime.register_scene("Main", || |scene: &Scene, ctx: &Context| {
//!     let visual: Visual = ctx.assets().create("player")?;
//!     scene.new_game_object()?.set_visual(&visual)
//! })?;
//! runtime.director_mut().set_start_scene("Main")?;
//! runtime.start()?;
//! runtime.update()?;
//! ```

mod binding;
mod config;
mod context;
mod entry;
mod error;
mod registry;
mod runtime;
mod script;
mod state;

pub mod asset;
pub mod scene;

pub use asset::{Asset, AssetProxy, Audio, MeshBuffer, Shader, Text, TextSlot, Texture, Visual};
pub use config::{NativeConfig, RuntimeConfig, CONFIG_CANDIDATES};
pub use context::Context;
pub use error::{Result, ScriptError};
pub use registry::AssetRegistry;
pub use runtime::{Runtime, RuntimePhase};
pub use scene::{
    AudioListener, Camera, GameObject, Scene, SceneBehavior, SceneDirector, SceneFactory,
    SceneState,
};
pub use script::{Frame, Script};
pub use state::StateHook;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::asset::{Asset, AssetProxy, Audio, MeshBuffer, Shader, Text, TextSlot, Texture, Visual};
    pub use crate::config::RuntimeConfig;
    pub use crate::context::Context;
    pub use crate::error::{Result, ScriptError};
    pub use crate::registry::AssetRegistry;
    pub use crate::runtime::Runtime;
    pub use crate::scene::{AudioListener, Camera, GameObject, Scene, SceneBehavior};
    pub use crate::script::{Frame, Script};
    pub use crate::state::StateHook;
}
