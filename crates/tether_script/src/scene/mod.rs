//! Scene composition
//!
//! A [`Scene`] is opened by the native core, populated once by its
//! [`SceneBehavior::load_assets`], updated every frame while active and
//! closed on transition. [`SceneDirector`] owns that sequence.

use std::sync::Arc;

use tether_native::{Link, MemberKind, NativeBoundary, NativeError, NativeHandle};

use crate::binding::Binding;
use crate::context::Context;
use crate::error::{Result, ScriptError};
use crate::script::Frame;

mod director;
mod objects;

pub use director::{SceneDirector, SceneFactory};
pub use objects::{AudioListener, Camera, GameObject};

/// Lifecycle of one scene instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    /// Native side opened, assets not loaded yet
    Constructed,
    /// `load_assets` is running
    AssetsLoading,
    /// Receiving frame updates
    Active,
    /// Closed; the handle and every member handle are stale
    Retired,
}

/// Per-scene script code
pub trait SceneBehavior {
    /// Create assets and populate the scene. Runs exactly once per scene
    /// instance, before any frame update.
    fn load_assets(&mut self, scene: &Scene, ctx: &Context) -> Result<()>;

    /// Per-frame work, after the scene is active
    fn update(&mut self, _frame: &mut Frame<'_>) -> Result<()> {
        Ok(())
    }
}

impl<F> SceneBehavior for F
where
    F: FnMut(&Scene, &Context) -> Result<()>,
{
    fn load_assets(&mut self, scene: &Scene, ctx: &Context) -> Result<()> {
        self(scene, ctx)
    }
}

/// One scene instance and its native handle
pub struct Scene {
    name: String,
    binding: Binding,
    listener: AudioListener,
    state: SceneState,
}

impl Scene {
    /// Ask the native core to construct a scene
    pub(crate) fn open(name: &str, boundary: Arc<dyn NativeBoundary>) -> Result<Self> {
        let handle = boundary.scene_open(name)?;
        if handle.is_null() {
            return Err(NativeError::call_failed(
                "scene_open",
                format!("no scene returned for '{name}'"),
            )
            .into());
        }
        let binding = Binding::new(handle, boundary);
        Ok(Self {
            name: name.to_string(),
            listener: AudioListener::new(binding.clone()),
            binding,
            state: SceneState::Constructed,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> NativeHandle {
        self.binding.handle()
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: SceneState) {
        log::trace!("Scene '{}': {:?} -> {:?}", self.name, self.state, state);
        self.state = state;
    }

    fn live(&self, operation: &'static str) -> Result<NativeHandle> {
        if self.state == SceneState::Retired {
            return Err(ScriptError::SceneRetired(self.name.clone()));
        }
        self.binding.live(operation)
    }

    fn spawn(&self, operation: &'static str, member: MemberKind) -> Result<Binding> {
        let scene = self.live(operation)?;
        let handle = self.binding.boundary().scene_spawn(scene, member)?;
        if handle.is_null() {
            return Err(NativeError::call_failed(operation, "native core returned a null handle").into());
        }
        Ok(Binding::new(handle, self.binding.boundary().clone()))
    }

    pub fn new_game_object(&self) -> Result<GameObject> {
        self.spawn("Scene::new_game_object", MemberKind::GameObject)
            .map(GameObject::new)
    }

    pub fn new_camera(&self) -> Result<Camera> {
        self.spawn("Scene::new_camera", MemberKind::Camera)
            .map(Camera::new)
    }

    /// Fresh proxy for the camera the scene renders through
    pub fn active_camera(&self) -> Result<Option<Camera>> {
        self.live("Scene::active_camera")?;
        let handle = self
            .binding
            .link("Scene::active_camera", Link::ActiveCamera, 0)?;
        Ok(handle.map(|h| Camera::new(Binding::new(h, self.binding.boundary().clone()))))
    }

    pub fn set_active_camera(&self, camera: &Camera) -> Result<()> {
        self.live("Scene::set_active_camera")?;
        self.binding.set_link(
            "Scene::set_active_camera",
            Link::ActiveCamera,
            0,
            camera.handle(),
        )
    }

    pub fn listener(&self) -> &AudioListener {
        &self.listener
    }

    /// Close the native side; idempotent
    pub(crate) fn retire(&mut self) -> Result<()> {
        if self.state == SceneState::Retired {
            return Ok(());
        }
        self.set_state(SceneState::Retired);
        self.binding.boundary().scene_close(self.binding.handle())?;
        Ok(())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("handle", &self.binding)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_native::HeadlessCore;

    fn open(name: &str) -> (Arc<HeadlessCore>, Scene) {
        let core = Arc::new(HeadlessCore::new());
        let scene = Scene::open(name, core.clone()).unwrap();
        (core, scene)
    }

    #[test]
    fn test_open_starts_constructed() {
        let (core, scene) = open("Main");
        assert_eq!(scene.state(), SceneState::Constructed);
        assert_eq!(core.scene_count(), 1);
    }

    #[test]
    fn test_retired_scene_rejects_calls() {
        let (core, mut scene) = open("Main");
        scene.retire().unwrap();

        assert_eq!(core.scene_count(), 0);
        assert!(matches!(
            scene.new_game_object(),
            Err(ScriptError::SceneRetired(name)) if name == "Main"
        ));
        assert!(matches!(
            scene.active_camera(),
            Err(ScriptError::SceneRetired(_))
        ));
    }

    #[test]
    fn test_retire_is_idempotent() {
        let (_core, mut scene) = open("Main");
        scene.retire().unwrap();
        scene.retire().unwrap();
        assert_eq!(scene.state(), SceneState::Retired);
    }
}
