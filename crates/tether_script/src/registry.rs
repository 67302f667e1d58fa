//! Named asset registry backed by the native asset manager
//!
//! The name table lives on the native side only. The registry keeps the
//! manager handle and nothing else, so there is no second copy to drift.

use std::sync::Arc;

use tether_native::{AssetKind, NativeBoundary, NativeError, NativeHandle};

use crate::asset::{Asset, AssetProxy};
use crate::error::{Result, ScriptError};

/// Get-or-create access to assets by name.
///
/// Within one registry a name maps to at most one native object. Asking for
/// a new asset under a name that is already taken returns a proxy aliasing
/// the existing object, provided it was created as the same kind; otherwise
/// the lookup fails with [`ScriptError::KindMismatch`].
#[derive(Clone)]
pub struct AssetRegistry {
    manager: NativeHandle,
    boundary: Arc<dyn NativeBoundary>,
}

impl AssetRegistry {
    pub fn new(boundary: Arc<dyn NativeBoundary>, manager: NativeHandle) -> Result<Self> {
        if manager.is_null() {
            return Err(NativeError::null_handle("AssetRegistry::new").into());
        }
        Ok(Self { manager, boundary })
    }

    /// Registry over the process asset manager
    pub fn from_boundary(boundary: Arc<dyn NativeBoundary>) -> Result<Self> {
        let manager = boundary.asset_manager()?;
        Self::new(boundary, manager)
    }

    pub fn manager(&self) -> NativeHandle {
        self.manager
    }

    /// Create `name`, or bind the existing asset if the name is taken
    pub fn create<A: AssetProxy>(&self, name: &str) -> Result<A> {
        if let Some(existing) = self.get::<A>(name)? {
            log::debug!(
                "{} '{}' already registered, aliasing {:?}",
                A::KIND,
                name,
                existing.handle()
            );
            return Ok(existing);
        }
        A::create_new(&self.boundary, self.manager, name)
    }

    /// Look up `name`; `None` when the native core has no such asset
    pub fn get<A: AssetProxy>(&self, name: &str) -> Result<Option<A>> {
        Ok(self
            .lookup(A::KIND, name)?
            .map(|handle| A::bind_existing(&self.boundary, handle)))
    }

    pub fn has(&self, name: &str) -> Result<bool> {
        Ok(self.boundary.asset_exists(self.manager, name)?)
    }

    /// Untyped [`AssetRegistry::create`]
    pub fn create_any(&self, kind: AssetKind, name: &str) -> Result<Asset> {
        if let Some(existing) = self.get_any(kind, name)? {
            return Ok(existing);
        }
        Asset::create_new(kind, &self.boundary, self.manager, name)
    }

    /// Untyped [`AssetRegistry::get`]
    pub fn get_any(&self, kind: AssetKind, name: &str) -> Result<Option<Asset>> {
        Ok(self
            .lookup(kind, name)?
            .map(|handle| Asset::bind_existing(kind, &self.boundary, handle)))
    }

    /// Resolve `name` and check it was created as `expected`
    fn lookup(&self, expected: AssetKind, name: &str) -> Result<Option<NativeHandle>> {
        let Some(handle) = self.boundary.asset_get(self.manager, name)?.non_null() else {
            return Ok(None);
        };
        match self.boundary.asset_kind(self.manager, handle)? {
            Some(found) if found == expected => Ok(Some(handle)),
            Some(found) => Err(ScriptError::KindMismatch { expected, found }),
            None => Err(NativeError::invalid_argument(
                "asset_get",
                format!("'{name}' resolved to {handle:?}, which is not an asset"),
            )
            .into()),
        }
    }

    /// Destroy the asset registered as `name`; false if there was none.
    ///
    /// Proxies still bound to it become stale.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let removed = self.boundary.asset_remove(self.manager, name)?;
        if removed {
            log::debug!("Removed asset '{}'", name);
        }
        Ok(removed)
    }

    /// Move an asset to a new name; false if `from` is absent or `to` is taken
    pub fn rename(&self, from: &str, to: &str) -> Result<bool> {
        Ok(self.boundary.asset_rename(self.manager, from, to)?)
    }

    /// The name an asset is registered under
    pub fn name_of<A: AssetProxy>(&self, asset: &A) -> Result<Option<String>> {
        if asset.is_null() {
            return Err(NativeError::null_handle("AssetRegistry::name_of").into());
        }
        Ok(self.boundary.asset_name(self.manager, asset.handle())?)
    }
}

impl std::fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("manager", &self.manager)
            .finish()
    }
}
