//! Objects that live inside a scene

use glam::{UVec2, Vec3};
use tether_native::{Link, NativeHandle, Property};

use crate::asset::{AssetProxy, Visual};
use crate::binding::Binding;
use crate::error::Result;

/// A drawable object placed in a scene.
///
/// Several GameObjects may share one [`Visual`]; each keeps its own
/// transform and atlas cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameObject {
    binding: Binding,
}

impl GameObject {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }

    pub fn handle(&self) -> NativeHandle {
        self.binding.handle()
    }

    pub fn position(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Position)
    }

    pub fn set_position(&self, position: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Position, position)
    }

    /// Euler angles
    pub fn rotation(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Rotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Rotation, rotation)
    }

    pub fn scale(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Scale)
    }

    pub fn set_scale(&self, scale: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Scale, scale)
    }

    /// Cell of the Visual's texture atlas this object draws
    pub fn atlas_offset(&self) -> Result<UVec2> {
        self.binding.uvec2(Property::AtlasOffset)
    }

    pub fn set_atlas_offset(&self, offset: UVec2) -> Result<()> {
        self.binding.set_uvec2(Property::AtlasOffset, offset)
    }

    /// Fresh proxy for the attached Visual, compared by handle only
    pub fn visual(&self) -> Result<Option<Visual>> {
        let handle = self.binding.link("GameObject::visual", Link::Visual, 0)?;
        Ok(handle.map(|h| self.binding.bind(h)))
    }

    pub fn set_visual(&self, visual: &Visual) -> Result<()> {
        self.binding
            .set_link("GameObject::set_visual", Link::Visual, 0, visual.handle())
    }

    pub fn clear_visual(&self) -> Result<()> {
        self.binding
            .clear_link("GameObject::clear_visual", Link::Visual, 0)
    }
}

/// A viewpoint inside a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    binding: Binding,
}

impl Camera {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }

    pub fn handle(&self) -> NativeHandle {
        self.binding.handle()
    }

    pub fn position(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Position)
    }

    pub fn set_position(&self, position: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Position, position)
    }

    pub fn rotation(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Rotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Rotation, rotation)
    }
}

/// The scene's audio listener.
///
/// It has no handle of its own: every call goes through the scene handle.
/// Native defaults are volume 0.5, facing `-Z` with `+Y` up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioListener {
    binding: Binding,
}

impl AudioListener {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }

    pub fn position(&self) -> Result<Vec3> {
        self.binding.vec3(Property::ListenerPosition)
    }

    pub fn set_position(&self, position: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::ListenerPosition, position)
    }

    pub fn volume(&self) -> Result<f32> {
        self.binding.f32(Property::ListenerVolume)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.binding.set_f32(Property::ListenerVolume, volume)
    }

    /// Direction the listener faces
    pub fn orientation_at(&self) -> Result<Vec3> {
        self.binding.vec3(Property::ListenerAt)
    }

    pub fn orientation_up(&self) -> Result<Vec3> {
        self.binding.vec3(Property::ListenerUp)
    }

    pub fn set_orientation(&self, at: Vec3, up: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::ListenerAt, at)?;
        self.binding.set_vec3(Property::ListenerUp, up)
    }
}
