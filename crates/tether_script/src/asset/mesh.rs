//! Geometry buffers

use tether_native::BufferKind;

use crate::binding::Binding;
use crate::error::{Result, ScriptError};

/// Floats per vertex position
pub const VERTEX_STRIDE: usize = 3;
/// Floats per texture coordinate
pub const UV_STRIDE: usize = 2;

/// Vertex positions, triangle indices and texture coordinates.
///
/// Each setter replaces the whole native buffer.
#[derive(Clone)]
pub struct MeshBuffer {
    binding: Binding,
}

asset_proxy!(MeshBuffer);

fn check_stride(property: &'static str, len: usize, stride: usize) -> Result<()> {
    if len % stride != 0 {
        return Err(ScriptError::invalid_value(
            property,
            format!("{len} floats is not a multiple of {stride}"),
        ));
    }
    Ok(())
}

impl MeshBuffer {
    fn bound(binding: Binding) -> Self {
        Self { binding }
    }

    /// Flat `x, y, z` positions
    pub fn set_vertices(&self, vertices: &[f32]) -> Result<()> {
        let handle = self.binding.live("MeshBuffer::set_vertices")?;
        check_stride("vertices", vertices.len(), VERTEX_STRIDE)?;
        Ok(self
            .binding
            .boundary()
            .upload_f32(handle, BufferKind::Vertices, vertices)?)
    }

    pub fn set_indices(&self, indices: &[u32]) -> Result<()> {
        let handle = self.binding.live("MeshBuffer::set_indices")?;
        Ok(self
            .binding
            .boundary()
            .upload_u32(handle, BufferKind::Indices, indices)?)
    }

    /// Flat `u, v` coordinates
    pub fn set_uvs(&self, uvs: &[f32]) -> Result<()> {
        let handle = self.binding.live("MeshBuffer::set_uvs")?;
        check_stride("uvs", uvs.len(), UV_STRIDE)?;
        Ok(self
            .binding
            .boundary()
            .upload_f32(handle, BufferKind::Uvs, uvs)?)
    }
}
