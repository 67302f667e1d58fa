use tether_native::AssetKind;

use crate::binding::Binding;
use crate::error::{Result, ScriptError};

/// Image data sampled by a Visual
#[derive(Clone)]
pub struct Texture {
    binding: Binding,
    source: Option<String>,
}

asset_proxy!(Texture);

impl Texture {
    fn bound(binding: Binding) -> Self {
        Self {
            binding,
            source: None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Buffered until [`Texture::load`]
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    pub fn load(&self) -> Result<()> {
        let handle = self.binding.live("Texture::load")?;
        let source = self.source.as_deref().ok_or(ScriptError::MissingSource {
            kind: AssetKind::Texture,
            field: "source",
        })?;
        self.binding.boundary().load(handle, &[source])?;
        Ok(())
    }
}
