//! Runtime configuration
//!
//! Loaded from the first config file found, then overridden by environment
//! variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tether_native::DEFAULT_API_SYMBOL;

use crate::error::{Result, ScriptError};

/// Files searched by [`RuntimeConfig::load`], in order
pub const CONFIG_CANDIDATES: &[&str] = &["tether.toml", "config/tether.toml"];

/// Native core library settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Shared library exporting the API table; headless when unset
    pub library: Option<PathBuf>,
    /// Symbol returning the API table
    pub api_symbol: String,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            library: None,
            api_symbol: DEFAULT_API_SYMBOL.to_string(),
        }
    }
}

/// Script runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Scene entered by `start`; falls back to the director's start scene
    pub start_scene: Option<String>,
    /// Return script errors from `update` instead of logging them
    pub halt_on_script_error: bool,
    /// Consecutive failures after which a script stops being updated (0 = never)
    pub max_script_failures: u32,
    /// Frames per second when the host drives the loop itself
    pub frame_rate: u32,
    /// Native core library
    pub native: NativeConfig,
    /// File this config was read from
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            start_scene: None,
            halt_on_script_error: false,
            max_script_failures: 8,
            frame_rate: 60,
            native: NativeConfig::default(),
            config_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from all sources
    pub fn load() -> Self {
        let mut config = Self::default();

        for path in CONFIG_CANDIDATES {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(loaded) => {
                    config = loaded;
                    log::info!("Loaded runtime config from {}", path);
                    break;
                }
                Err(e) => log::warn!("Ignoring {}: {}", path, e),
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| ScriptError::Config(format!("{}: {}", path.display(), e)))?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScriptError::Config(e.to_string()))
    }

    /// Apply `TETHER_*` overrides read through `var`
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(scene) = var("TETHER_START_SCENE").filter(|s| !s.is_empty()) {
            log::info!("Start scene from env: {}", scene);
            self.start_scene = Some(scene);
        }

        if let Some(library) = var("TETHER_NATIVE_LIBRARY").filter(|s| !s.is_empty()) {
            log::info!("Native library from env: {}", library);
            self.native.library = Some(PathBuf::from(library));
        }

        if let Some(halt) = var("TETHER_HALT_ON_SCRIPT_ERROR") {
            self.halt_on_script_error = halt == "1" || halt.eq_ignore_ascii_case("true");
        }
    }
}
