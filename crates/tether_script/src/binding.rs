//! Handle binding shared by every scripting proxy

use std::fmt;
use std::sync::Arc;

use glam::{UVec2, Vec2, Vec3};
use tether_native::{Link, NativeBoundary, NativeError, NativeHandle, Property};

use crate::asset::AssetProxy;
use crate::error::Result;

/// One native handle plus the boundary it is reached through.
///
/// Bindings are only constructed inside this crate, by the asset factories
/// and by scene code wrapping handles the native core hands back. The handle
/// never changes after construction.
#[derive(Clone)]
pub struct Binding {
    handle: NativeHandle,
    boundary: Arc<dyn NativeBoundary>,
}

impl Binding {
    pub(crate) fn new(handle: NativeHandle, boundary: Arc<dyn NativeBoundary>) -> Self {
        Self { handle, boundary }
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    pub(crate) fn boundary(&self) -> &Arc<dyn NativeBoundary> {
        &self.boundary
    }

    /// The handle, or a null-handle error naming `operation`
    pub(crate) fn live(&self, operation: &'static str) -> Result<NativeHandle> {
        if self.handle.is_null() {
            return Err(NativeError::null_handle(operation).into());
        }
        Ok(self.handle)
    }

    /// Wrap another handle reached through the same boundary
    pub(crate) fn bind<P: AssetProxy>(&self, handle: NativeHandle) -> P {
        P::bind_existing(&self.boundary, handle)
    }

    pub(crate) fn f32(&self, property: Property) -> Result<f32> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_f32(handle, property)?)
    }

    pub(crate) fn set_f32(&self, property: Property, value: f32) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_f32(handle, property, value)?)
    }

    pub(crate) fn bool(&self, property: Property) -> Result<bool> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_bool(handle, property)?)
    }

    pub(crate) fn set_bool(&self, property: Property, value: bool) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_bool(handle, property, value)?)
    }

    pub(crate) fn vec2(&self, property: Property) -> Result<Vec2> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_vec2(handle, property)?)
    }

    pub(crate) fn set_vec2(&self, property: Property, value: Vec2) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_vec2(handle, property, value)?)
    }

    pub(crate) fn vec3(&self, property: Property) -> Result<Vec3> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_vec3(handle, property)?)
    }

    pub(crate) fn set_vec3(&self, property: Property, value: Vec3) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_vec3(handle, property, value)?)
    }

    pub(crate) fn uvec2(&self, property: Property) -> Result<UVec2> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_uvec2(handle, property)?)
    }

    pub(crate) fn set_uvec2(&self, property: Property, value: UVec2) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_uvec2(handle, property, value)?)
    }

    pub(crate) fn string(&self, property: Property) -> Result<String> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.get_string(handle, property)?)
    }

    pub(crate) fn set_string(&self, property: Property, value: &str) -> Result<()> {
        let handle = self.live(property.name())?;
        Ok(self.boundary.set_string(handle, property, value)?)
    }

    /// Follow a relation; `None` when unset
    pub(crate) fn link(&self, operation: &'static str, link: Link, slot: i32) -> Result<Option<NativeHandle>> {
        let handle = self.live(operation)?;
        Ok(self.boundary.get_link(handle, link, slot)?.non_null())
    }

    /// Point a relation at a live object
    pub(crate) fn set_link(
        &self,
        operation: &'static str,
        link: Link,
        slot: i32,
        target: NativeHandle,
    ) -> Result<()> {
        let handle = self.live(operation)?;
        if target.is_null() {
            return Err(NativeError::null_handle(operation).into());
        }
        Ok(self.boundary.set_link(handle, link, slot, target)?)
    }

    pub(crate) fn clear_link(&self, operation: &'static str, link: Link, slot: i32) -> Result<()> {
        let handle = self.live(operation)?;
        Ok(self.boundary.set_link(handle, link, slot, NativeHandle::null())?)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.handle, f)
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Binding {}
