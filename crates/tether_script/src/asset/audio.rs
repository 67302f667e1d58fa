//! Positional audio sources

use glam::Vec3;
use tether_native::{AssetKind, AudioCommand, Property};

use crate::binding::Binding;
use crate::error::{Result, ScriptError};

/// A sound clip with its own playback state.
///
/// Transport commands are fire-and-forget. Every other property is read and
/// written straight through to the native source.
#[derive(Clone)]
pub struct Audio {
    binding: Binding,
    source: Option<String>,
}

asset_proxy!(Audio);

impl Audio {
    fn bound(binding: Binding) -> Self {
        Self {
            binding,
            source: None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    pub fn load(&self) -> Result<()> {
        let handle = self.binding.live("Audio::load")?;
        let source = self.source.as_deref().ok_or(ScriptError::MissingSource {
            kind: AssetKind::Audio,
            field: "source",
        })?;
        self.binding.boundary().load(handle, &[source])?;
        Ok(())
    }

    fn command(&self, operation: &'static str, command: AudioCommand) -> Result<()> {
        let handle = self.binding.live(operation)?;
        self.binding.boundary().audio_command(handle, command)?;
        Ok(())
    }

    pub fn play(&self) -> Result<()> {
        self.command("Audio::play", AudioCommand::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.command("Audio::pause", AudioCommand::Pause)
    }

    pub fn stop(&self) -> Result<()> {
        self.command("Audio::stop", AudioCommand::Stop)
    }

    pub fn pitch(&self) -> Result<f32> {
        self.binding.f32(Property::Pitch)
    }

    pub fn set_pitch(&self, pitch: f32) -> Result<()> {
        self.binding.set_f32(Property::Pitch, pitch)
    }

    pub fn volume(&self) -> Result<f32> {
        self.binding.f32(Property::Volume)
    }

    pub fn set_volume(&self, volume: f32) -> Result<()> {
        self.binding.set_f32(Property::Volume, volume)
    }

    pub fn position(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Position)
    }

    pub fn set_position(&self, position: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Position, position)
    }

    pub fn velocity(&self) -> Result<Vec3> {
        self.binding.vec3(Property::Velocity)
    }

    pub fn set_velocity(&self, velocity: Vec3) -> Result<()> {
        self.binding.set_vec3(Property::Velocity, velocity)
    }

    pub fn looping(&self) -> Result<bool> {
        self.binding.bool(Property::Looping)
    }

    pub fn set_looping(&self, looping: bool) -> Result<()> {
        self.binding.set_bool(Property::Looping, looping)
    }
}
