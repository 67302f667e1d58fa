//! Renderable bundle of mesh, shader and textures

use glam::UVec2;
use tether_native::{Link, Property};

use crate::asset::{AssetProxy, MeshBuffer, Shader, Texture};
use crate::binding::Binding;
use crate::error::{Result, ScriptError};

/// Everything the renderer needs to draw one or more GameObjects.
///
/// Relations are read through from the native core every time: two reads of
/// [`Visual::mesh`] produce two proxies with equal handles.
#[derive(Clone)]
pub struct Visual {
    binding: Binding,
}

asset_proxy!(Visual);

fn texture_slot(slot: u32) -> Result<i32> {
    i32::try_from(slot)
        .map_err(|_| ScriptError::invalid_value("texture_slot", format!("slot {slot} out of range")))
}

impl Visual {
    fn bound(binding: Binding) -> Self {
        Self { binding }
    }

    pub fn mesh(&self) -> Result<Option<MeshBuffer>> {
        let handle = self.binding.link("Visual::mesh", Link::Mesh, 0)?;
        Ok(handle.map(|h| self.binding.bind(h)))
    }

    pub fn set_mesh(&self, mesh: &MeshBuffer) -> Result<()> {
        self.binding
            .set_link("Visual::set_mesh", Link::Mesh, 0, mesh.handle())
    }

    pub fn shader(&self) -> Result<Option<Shader>> {
        let handle = self.binding.link("Visual::shader", Link::Shader, 0)?;
        Ok(handle.map(|h| self.binding.bind(h)))
    }

    pub fn set_shader(&self, shader: &Shader) -> Result<()> {
        self.binding
            .set_link("Visual::set_shader", Link::Shader, 0, shader.handle())
    }

    /// Texture bound to `slot`, if any
    pub fn texture(&self, slot: u32) -> Result<Option<Texture>> {
        let handle = self
            .binding
            .link("Visual::texture", Link::Texture, texture_slot(slot)?)?;
        Ok(handle.map(|h| self.binding.bind(h)))
    }

    pub fn set_texture(&self, slot: u32, texture: &Texture) -> Result<()> {
        self.binding.set_link(
            "Visual::set_texture",
            Link::Texture,
            texture_slot(slot)?,
            texture.handle(),
        )
    }

    pub fn clear_texture(&self, slot: u32) -> Result<()> {
        self.binding
            .clear_link("Visual::clear_texture", Link::Texture, texture_slot(slot)?)
    }

    /// Atlas columns and rows of the bound textures
    pub fn atlas_size(&self) -> Result<UVec2> {
        self.binding.uvec2(Property::AtlasSize)
    }

    pub fn set_atlas_size(&self, size: UVec2) -> Result<()> {
        if size.x == 0 || size.y == 0 {
            return Err(ScriptError::invalid_value(
                "atlas_size",
                format!("{}x{} has an empty dimension", size.x, size.y),
            ));
        }
        self.binding.set_uvec2(Property::AtlasSize, size)
    }
}
