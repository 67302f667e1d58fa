//! Typed proxies for native assets
//!
//! Every asset proxy holds exactly one bound handle and reaches the native
//! core through it. Proxies come from two factories only:
//!
//! * [`AssetProxy::create_new`] asks the native asset manager to allocate a
//!   new object and binds the returned handle.
//! * [`AssetProxy::bind_existing`] wraps a handle the native core already
//!   handed out, without allocating anything.
//!
//! The set of asset kinds is closed; [`Asset`] is the tagged union over it.

use std::sync::Arc;

use tether_native::{AssetKind, NativeBoundary, NativeError, NativeHandle};

use crate::binding::Binding;
use crate::error::{Result, ScriptError};

mod sealed {
    use crate::binding::Binding;

    pub trait Bound {
        fn from_binding(binding: Binding) -> Self;
        fn binding(&self) -> &Binding;
    }
}

/// A scripting-side proxy for one kind of native asset
pub trait AssetProxy: sealed::Bound + Clone + std::fmt::Debug + Into<Asset> {
    /// Kind the native asset manager allocates for this proxy
    const KIND: AssetKind;

    /// Allocate a new native asset named `name` and bind it.
    ///
    /// A null handle from the native core is reported as
    /// [`ScriptError::CreateFailed`]; that is what happens when the name is
    /// already taken.
    fn create_new(
        boundary: &Arc<dyn NativeBoundary>,
        manager: NativeHandle,
        name: &str,
    ) -> Result<Self> {
        if manager.is_null() {
            return Err(NativeError::null_handle("create_new").into());
        }
        let handle = boundary.asset_create(manager, Self::KIND, name)?;
        if handle.is_null() {
            return Err(ScriptError::CreateFailed {
                kind: Self::KIND,
                name: name.to_string(),
            });
        }
        log::debug!("Created {} '{}' at {:?}", Self::KIND, name, handle);
        Ok(Self::from_binding(Binding::new(handle, boundary.clone())))
    }

    /// Wrap an existing native handle. No native call is made.
    fn bind_existing(boundary: &Arc<dyn NativeBoundary>, handle: NativeHandle) -> Self {
        Self::from_binding(Binding::new(handle, boundary.clone()))
    }

    fn handle(&self) -> NativeHandle {
        self.binding().handle()
    }

    /// True for a proxy bound to no object; every operation on it fails
    fn is_null(&self) -> bool {
        self.handle().is_null()
    }
}

/// Implements the sealed binding, equality, debug output and the
/// conversions to and from [`Asset`] for one proxy type.
macro_rules! asset_proxy {
    ($ty:ident) => {
        impl crate::asset::sealed::Bound for $ty {
            fn from_binding(binding: crate::binding::Binding) -> Self {
                Self::bound(binding)
            }

            fn binding(&self) -> &crate::binding::Binding {
                &self.binding
            }
        }

        impl crate::asset::AssetProxy for $ty {
            const KIND: tether_native::AssetKind = tether_native::AssetKind::$ty;
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.binding == other.binding
            }
        }

        impl Eq for $ty {}

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($ty))
                    .field(&self.binding)
                    .finish()
            }
        }

        impl From<$ty> for crate::asset::Asset {
            fn from(asset: $ty) -> Self {
                crate::asset::Asset::$ty(asset)
            }
        }

        impl TryFrom<crate::asset::Asset> for $ty {
            type Error = crate::error::ScriptError;

            fn try_from(asset: crate::asset::Asset) -> crate::error::Result<Self> {
                match asset {
                    crate::asset::Asset::$ty(inner) => Ok(inner),
                    other => Err(crate::error::ScriptError::KindMismatch {
                        expected: tether_native::AssetKind::$ty,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

mod audio;
mod mesh;
mod shader;
mod text;
mod texture;
mod visual;

pub use audio::Audio;
pub use mesh::MeshBuffer;
pub use shader::Shader;
pub use text::{Text, TextSlot};
pub use texture::Texture;
pub use visual::Visual;

/// Any asset, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    Visual(Visual),
    Shader(Shader),
    MeshBuffer(MeshBuffer),
    Texture(Texture),
    Audio(Audio),
    Text(Text),
}

impl Asset {
    /// Allocate a new native asset of `kind`
    pub fn create_new(
        kind: AssetKind,
        boundary: &Arc<dyn NativeBoundary>,
        manager: NativeHandle,
        name: &str,
    ) -> Result<Self> {
        Ok(match kind {
            AssetKind::Visual => Visual::create_new(boundary, manager, name)?.into(),
            AssetKind::Shader => Shader::create_new(boundary, manager, name)?.into(),
            AssetKind::MeshBuffer => MeshBuffer::create_new(boundary, manager, name)?.into(),
            AssetKind::Texture => Texture::create_new(boundary, manager, name)?.into(),
            AssetKind::Audio => Audio::create_new(boundary, manager, name)?.into(),
            AssetKind::Text => Text::create_new(boundary, manager, name)?.into(),
        })
    }

    /// Wrap an existing handle as `kind`
    pub fn bind_existing(
        kind: AssetKind,
        boundary: &Arc<dyn NativeBoundary>,
        handle: NativeHandle,
    ) -> Self {
        match kind {
            AssetKind::Visual => Visual::bind_existing(boundary, handle).into(),
            AssetKind::Shader => Shader::bind_existing(boundary, handle).into(),
            AssetKind::MeshBuffer => MeshBuffer::bind_existing(boundary, handle).into(),
            AssetKind::Texture => Texture::bind_existing(boundary, handle).into(),
            AssetKind::Audio => Audio::bind_existing(boundary, handle).into(),
            AssetKind::Text => Text::bind_existing(boundary, handle).into(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Asset::Visual(_) => AssetKind::Visual,
            Asset::Shader(_) => AssetKind::Shader,
            Asset::MeshBuffer(_) => AssetKind::MeshBuffer,
            Asset::Texture(_) => AssetKind::Texture,
            Asset::Audio(_) => AssetKind::Audio,
            Asset::Text(_) => AssetKind::Text,
        }
    }

    pub fn handle(&self) -> NativeHandle {
        match self {
            Asset::Visual(a) => a.handle(),
            Asset::Shader(a) => a.handle(),
            Asset::MeshBuffer(a) => a.handle(),
            Asset::Texture(a) => a.handle(),
            Asset::Audio(a) => a.handle(),
            Asset::Text(a) => a.handle(),
        }
    }
}
