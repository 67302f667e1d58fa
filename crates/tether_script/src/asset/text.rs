//! Font-backed text and its named slots

use glam::Vec2;
use tether_native::{AssetKind, Link, NativeError, NativeHandle, Property};

use crate::asset::{AssetProxy, Shader};
use crate::binding::Binding;
use crate::error::{Result, ScriptError};

/// A font plus any number of named, independently positioned strings
#[derive(Clone)]
pub struct Text {
    binding: Binding,
    source: Option<String>,
}

asset_proxy!(Text);

impl Text {
    fn bound(binding: Binding) -> Self {
        Self {
            binding,
            source: None,
        }
    }

    /// Font source, buffered until [`Text::load`]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    pub fn load(&self) -> Result<()> {
        let handle = self.binding.live("Text::load")?;
        let source = self.source.as_deref().ok_or(ScriptError::MissingSource {
            kind: AssetKind::Text,
            field: "source",
        })?;
        self.binding.boundary().load(handle, &[source])?;
        Ok(())
    }

    pub fn set_shader(&self, shader: &Shader) -> Result<()> {
        self.binding
            .set_link("Text::set_shader", Link::Shader, 0, shader.handle())
    }

    pub fn shader(&self) -> Result<Option<Shader>> {
        let handle = self.binding.link("Text::shader", Link::Shader, 0)?;
        Ok(handle.map(|h| self.binding.bind(h)))
    }

    /// The slot named `name`, created by the native core on first access.
    ///
    /// Repeated calls with the same name return proxies with equal handles.
    pub fn slot(&self, name: &str) -> Result<TextSlot> {
        let handle = self.binding.live("Text::slot")?;
        let slot = self.binding.boundary().text_slot(handle, name)?;
        if slot.is_null() {
            return Err(NativeError::call_failed(
                "text_slot",
                format!("no slot returned for '{name}'"),
            )
            .into());
        }
        Ok(TextSlot {
            binding: Binding::new(slot, self.binding.boundary().clone()),
        })
    }

    /// Destroy a slot; false if it did not exist
    pub fn remove_slot(&self, name: &str) -> Result<bool> {
        let handle = self.binding.live("Text::remove_slot")?;
        Ok(self.binding.boundary().text_remove_slot(handle, name)?)
    }
}

/// One string drawn by a [`Text`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSlot {
    binding: Binding,
}

impl TextSlot {
    pub fn handle(&self) -> NativeHandle {
        self.binding.handle()
    }

    /// Screen position
    pub fn position(&self) -> Result<Vec2> {
        self.binding.vec2(Property::SlotPosition)
    }

    pub fn set_position(&self, position: Vec2) -> Result<()> {
        self.binding.set_vec2(Property::SlotPosition, position)
    }

    pub fn content(&self) -> Result<String> {
        self.binding.string(Property::SlotContent)
    }

    pub fn set_content(&self, content: &str) -> Result<()> {
        self.binding.set_string(Property::SlotContent, content)
    }

    pub fn visible(&self) -> Result<bool> {
        self.binding.bool(Property::SlotVisible)
    }

    pub fn set_visible(&self, visible: bool) -> Result<()> {
        self.binding.set_bool(Property::SlotVisible, visible)
    }
}
