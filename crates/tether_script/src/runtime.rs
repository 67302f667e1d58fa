//! Script runtime: the scripting side of the native frame loop

use crate::config::RuntimeConfig;
use crate::context::Context;
use crate::error::{Result, ScriptError};
use crate::scene::{SceneBehavior, SceneDirector};
use crate::script::{Frame, Script};

/// Where the runtime is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimePhase {
    /// Scenes and scripts can be registered
    Created,
    /// Start scene entered; frames are being dispatched
    Running,
    /// Stopped; the active scene has been retired
    Stopped,
}

struct ScriptSlot {
    script: Box<dyn Script>,
    initialized: bool,
    failures: u32,
    disabled: bool,
}

/// Owns the context, the scene director and every script.
///
/// The native core (or a host standing in for it) calls [`Runtime::start`]
/// once and [`Runtime::update`] once per frame.
pub struct Runtime {
    ctx: Context,
    config: RuntimeConfig,
    director: SceneDirector,
    scripts: Vec<ScriptSlot>,
    phase: RuntimePhase,
    frame: u64,
}

impl Runtime {
    pub fn new(ctx: Context, config: RuntimeConfig) -> Self {
        Self {
            ctx,
            config,
            director: SceneDirector::new(),
            scripts: Vec::new(),
            phase: RuntimePhase::Created,
            frame: 0,
        }
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn director(&self) -> &SceneDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut SceneDirector {
        &mut self.director
    }

    pub fn phase(&self) -> RuntimePhase {
        self.phase
    }

    /// Frames dispatched so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn register_scene<F, B>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> B + 'static,
        B: SceneBehavior + 'static,
    {
        self.director.register(name, factory)
    }

    /// Attach a script; scripts update in the order they were added
    pub fn add_script<S: Script + 'static>(&mut self, script: S) {
        log::debug!("Added script '{}'", script.name());
        self.scripts.push(ScriptSlot {
            script: Box::new(script),
            initialized: false,
            failures: 0,
            disabled: false,
        });
    }

    /// Number of scripts still being updated
    pub fn active_scripts(&self) -> usize {
        self.scripts.iter().filter(|slot| !slot.disabled).count()
    }

    /// Enter the start scene, then initialise scripts
    pub fn start(&mut self) -> Result<()> {
        if self.phase != RuntimePhase::Created {
            return Err(ScriptError::InvalidState(format!(
                "start called while {:?}",
                self.phase
            )));
        }

        let start = self
            .config
            .start_scene
            .clone()
            .or_else(|| self.director.start_scene().map(str::to_string))
            .ok_or(ScriptError::NoStartScene)?;

        // A failed start scene leaves the runtime running with no active scene
        self.phase = RuntimePhase::Running;
        self.director.enter(&start, &self.ctx)?;
        self.init_scripts()
    }

    fn init_scripts(&mut self) -> Result<()> {
        for slot in self.scripts.iter_mut().filter(|slot| !slot.initialized) {
            slot.initialized = true;
            let result = slot.script.init(&self.ctx);
            record(&self.config, slot, "init", result)?;
        }
        Ok(())
    }

    /// Dispatch one frame.
    ///
    /// Scripts only run while a scene is active. A transition requested during
    /// the frame is applied after every script has run. When an error halts the
    /// frame, a transition requested before it stays queued for the next one.
    pub fn update(&mut self) -> Result<()> {
        match self.phase {
            RuntimePhase::Created => self.start()?,
            RuntimePhase::Stopped => {
                return Err(ScriptError::InvalidState("update called after stop".into()))
            }
            RuntimePhase::Running => {}
        }
        self.init_scripts()?;

        let number = self.frame;
        self.frame += 1;

        let mut next_scene = None;
        let outcome = match self.director.active_mut() {
            Some(active) => {
                let mut frame = Frame::new(&self.ctx, &active.scene, number, &mut next_scene);
                dispatch(&self.config, active.behavior.as_mut(), &mut self.scripts, &mut frame)
            }
            None => {
                log::trace!("Frame {}: no active scene", number);
                Ok(())
            }
        };

        if let Some(name) = next_scene {
            self.director.request(&name)?;
        }
        outcome?;
        self.director.apply_pending(&self.ctx)?;
        Ok(())
    }

    /// Queue a scene transition from outside a frame
    pub fn request_scene(&mut self, name: &str) -> Result<()> {
        self.director.request(name)
    }

    /// Retire the active scene; further updates are rejected
    pub fn stop(&mut self) -> Result<()> {
        if self.phase == RuntimePhase::Stopped {
            return Ok(());
        }
        self.phase = RuntimePhase::Stopped;
        log::info!("Runtime stopped after {} frames", self.frame);
        self.director.retire_active()
    }
}

/// Run the scene behavior, then every enabled script, for one frame
fn dispatch(
    config: &RuntimeConfig,
    behavior: &mut dyn SceneBehavior,
    scripts: &mut [ScriptSlot],
    frame: &mut Frame<'_>,
) -> Result<()> {
    if let Err(err) = behavior.update(frame) {
        if config.halt_on_script_error {
            return Err(err);
        }
        log::warn!("Scene '{}' update failed: {}", frame.scene().name(), err);
    }

    for slot in scripts.iter_mut().filter(|slot| !slot.disabled) {
        let result = slot.script.update(frame);
        record(config, slot, "update", result)?;
    }
    Ok(())
}

/// Apply the failure policy to one script call
fn record(
    config: &RuntimeConfig,
    slot: &mut ScriptSlot,
    stage: &str,
    result: Result<()>,
) -> Result<()> {
    let err = match result {
        Ok(()) => {
            slot.failures = 0;
            return Ok(());
        }
        Err(err) => err,
    };

    if config.halt_on_script_error {
        return Err(err);
    }

    slot.failures += 1;
    log::warn!("Script '{}' {} failed: {}", slot.script.name(), stage, err);

    if config.max_script_failures > 0 && slot.failures >= config.max_script_failures {
        slot.disabled = true;
        log::error!(
            "Script '{}' disabled after {} consecutive failures",
            slot.script.name(),
            slot.failures
        );
    }
    Ok(())
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("phase", &self.phase)
            .field("frame", &self.frame)
            .field("scripts", &self.scripts.len())
            .field("director", &self.director)
            .finish()
    }
}
