//! Shader programs

use crate::binding::Binding;
use crate::error::{Result, ScriptError};
use tether_native::AssetKind;

/// A shader program built from a vertex and a fragment source.
///
/// Sources are kept on the scripting side until [`Shader::load`] sends both.
#[derive(Clone)]
pub struct Shader {
    binding: Binding,
    vertex_source: Option<String>,
    fragment_source: Option<String>,
}

asset_proxy!(Shader);

impl Shader {
    fn bound(binding: Binding) -> Self {
        Self {
            binding,
            vertex_source: None,
            fragment_source: None,
        }
    }

    pub fn vertex_source(&self) -> Option<&str> {
        self.vertex_source.as_deref()
    }

    pub fn set_vertex_source(&mut self, source: impl Into<String>) {
        self.vertex_source = Some(source.into());
    }

    pub fn fragment_source(&self) -> Option<&str> {
        self.fragment_source.as_deref()
    }

    pub fn set_fragment_source(&mut self, source: impl Into<String>) {
        self.fragment_source = Some(source.into());
    }

    /// Compile the program from the buffered sources
    pub fn load(&self) -> Result<()> {
        let handle = self.binding.live("Shader::load")?;
        let vertex = self.vertex_source.as_deref().ok_or(ScriptError::MissingSource {
            kind: AssetKind::Shader,
            field: "vertex_source",
        })?;
        let fragment = self
            .fragment_source
            .as_deref()
            .ok_or(ScriptError::MissingSource {
                kind: AssetKind::Shader,
                field: "fragment_source",
            })?;
        self.binding.boundary().load(handle, &[vertex, fragment])?;
        Ok(())
    }
}
