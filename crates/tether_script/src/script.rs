//! Script behaviours driven by the native frame loop

use crate::context::Context;
use crate::error::Result;
use crate::registry::AssetRegistry;
use crate::scene::Scene;

/// What a script sees during one frame
pub struct Frame<'a> {
    ctx: &'a Context,
    scene: &'a Scene,
    number: u64,
    next_scene: &'a mut Option<String>,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        ctx: &'a Context,
        scene: &'a Scene,
        number: u64,
        next_scene: &'a mut Option<String>,
    ) -> Self {
        Self {
            ctx,
            scene,
            number,
            next_scene,
        }
    }

    pub fn ctx(&self) -> &'a Context {
        self.ctx
    }

    pub fn assets(&self) -> &'a AssetRegistry {
        self.ctx.assets()
    }

    /// The active scene
    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    /// Frames dispatched before this one
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Switch scenes once this frame is over
    pub fn request_scene(&mut self, name: impl Into<String>) {
        *self.next_scene = Some(name.into());
    }

    pub fn requested_scene(&self) -> Option<&str> {
        self.next_scene.as_deref()
    }
}

/// A script attached to the runtime.
///
/// `init` runs once, after the start scene has loaded and before the first
/// `update`. `update` runs once per frame while a scene is active. Errors are
/// logged by the runtime and do not stop other scripts.
pub trait Script {
    /// Name used in log messages
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn init(&mut self, _ctx: &Context) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, frame: &mut Frame<'_>) -> Result<()>;
}
