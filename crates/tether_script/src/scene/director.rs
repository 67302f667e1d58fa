//! Scene registration and transitions

use std::collections::HashMap;

use crate::context::Context;
use crate::error::{Result, ScriptError};
use crate::scene::{Scene, SceneBehavior, SceneState};

/// Builds a fresh behavior for each scene instance
pub type SceneFactory = Box<dyn Fn() -> Box<dyn SceneBehavior>>;

pub(crate) struct ActiveScene {
    pub scene: Scene,
    pub behavior: Box<dyn SceneBehavior>,
}

/// Registry of scene behaviors by name plus the currently active scene.
///
/// Transitions requested during a frame are queued and applied by
/// [`SceneDirector::apply_pending`] once the frame is over. The last request
/// in a frame wins.
#[derive(Default)]
pub struct SceneDirector {
    factories: HashMap<String, SceneFactory>,
    start: Option<String>,
    active: Option<ActiveScene>,
    pending: Option<String>,
    instances: u64,
}

impl SceneDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene under `name`
    pub fn register<F, B>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> B + 'static,
        B: SceneBehavior + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(ScriptError::SceneAlreadyRegistered(name));
        }
        log::debug!("Registered scene '{}'", name);
        self.factories
            .insert(name, Box::new(move || Box::new(factory()) as Box<dyn SceneBehavior>));
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered scene names, sorted
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Mark the scene entered when the runtime starts
    pub fn set_start_scene(&mut self, name: &str) -> Result<()> {
        if !self.is_registered(name) {
            return Err(ScriptError::SceneNotFound(name.to_string()));
        }
        self.start = Some(name.to_string());
        Ok(())
    }

    pub fn start_scene(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn active_scene(&self) -> Option<&Scene> {
        self.active.as_ref().map(|active| &active.scene)
    }

    pub(crate) fn active_mut(&mut self) -> Option<&mut ActiveScene> {
        self.active.as_mut()
    }

    /// Scene instances entered so far, including failed loads
    pub fn instances(&self) -> u64 {
        self.instances
    }

    /// Queue a transition for the end of the current frame
    pub fn request(&mut self, name: &str) -> Result<()> {
        if !self.is_registered(name) {
            return Err(ScriptError::SceneNotFound(name.to_string()));
        }
        if let Some(previous) = self.pending.replace(name.to_string()) {
            log::debug!("Scene request '{}' replaced by '{}'", previous, name);
        }
        Ok(())
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Apply a queued transition; true if one ran
    pub fn apply_pending(&mut self, ctx: &Context) -> Result<bool> {
        match self.pending.take() {
            Some(name) => self.enter(&name, ctx).map(|_| true),
            None => Ok(false),
        }
    }

    /// Retire the active scene, then open and load `name`.
    ///
    /// When loading fails the new scene is retired as well and no scene is
    /// active afterwards.
    pub fn enter(&mut self, name: &str, ctx: &Context) -> Result<()> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ScriptError::SceneNotFound(name.to_string()))?;
        let mut behavior = factory();

        self.retire_active()?;

        let mut scene = Scene::open(name, ctx.boundary().clone())?;
        self.instances += 1;
        log::info!("Loading scene '{}'", name);

        scene.set_state(SceneState::AssetsLoading);
        if let Err(err) = behavior.load_assets(&scene, ctx) {
            log::warn!("Scene '{}' failed to load assets: {}", name, err);
            if let Err(close) = scene.retire() {
                log::warn!("Closing scene '{}' failed: {}", name, close);
            }
            return Err(ScriptError::LoadAssetsFailed {
                scene: name.to_string(),
                source: Box::new(err),
            });
        }
        scene.set_state(SceneState::Active);

        log::info!("Scene '{}' active", name);
        self.active = Some(ActiveScene { scene, behavior });
        Ok(())
    }

    /// Retire the active scene, if any
    pub fn retire_active(&mut self) -> Result<()> {
        if let Some(mut active) = self.active.take() {
            log::info!("Retiring scene '{}'", active.scene.name());
            active.scene.retire()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for SceneDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDirector")
            .field("scenes", &self.scene_names())
            .field("start", &self.start)
            .field("active", &self.active_scene())
            .field("pending", &self.pending)
            .finish()
    }
}
