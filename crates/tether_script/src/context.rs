//! Per-runtime context handed to scenes and scripts

use std::collections::HashMap;
use std::sync::Arc;

use tether_native::{
    KeyboardState, NativeBoundary, NativeHandle, StateRegion, StructMirror, WindowState,
};

use crate::error::Result;
use crate::registry::AssetRegistry;
use crate::state::StateHook;

/// Everything script code needs to reach the native core.
///
/// Built once per runtime. Region addresses are resolved at construction and
/// cached; the native core publishes them for the life of the process.
pub struct Context {
    boundary: Arc<dyn NativeBoundary>,
    assets: AssetRegistry,
    regions: HashMap<StateRegion, NativeHandle>,
}

impl Context {
    pub fn new(boundary: Arc<dyn NativeBoundary>) -> Result<Self> {
        let assets = AssetRegistry::from_boundary(boundary.clone())?;

        let mut regions = HashMap::new();
        for region in StateRegion::ALL {
            let handle = boundary.state_region(region)?;
            if handle.is_null() {
                log::warn!("Native core publishes no {:?} state", region);
            }
            regions.insert(region, handle);
        }

        Ok(Self {
            boundary,
            assets,
            regions,
        })
    }

    pub fn boundary(&self) -> &Arc<dyn NativeBoundary> {
        &self.boundary
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    /// Hook for the state struct `T`
    pub fn state_hook<T: StructMirror>(&self) -> Result<StateHook<T>> {
        let region = self.regions.get(&T::REGION).copied().unwrap_or_default();
        StateHook::new(self.boundary.clone(), region)
    }

    /// Current window snapshot
    pub fn window(&self) -> Result<WindowState> {
        self.state_hook::<WindowState>()?.query()
    }

    /// Current keyboard snapshot
    pub fn keyboard(&self) -> Result<KeyboardState> {
        self.state_hook::<KeyboardState>()?.query()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("assets", &self.assets)
            .field("regions", &self.regions)
            .finish()
    }
}
