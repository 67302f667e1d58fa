//! Error types for the scripting layer

use tether_native::{AssetKind, NativeError};
use thiserror::Error;

/// Result type for scripting operations
pub type Result<T> = std::result::Result<T, ScriptError>;

/// Errors raised by assets, scenes, scripts and the runtime
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Failure reported by the native boundary
    #[error(transparent)]
    Native(#[from] NativeError),

    /// The native core returned a null handle for a create call
    #[error("Native core returned a null handle creating {kind} '{name}'")]
    CreateFailed { kind: AssetKind, name: String },

    /// An untyped asset was converted to the wrong proxy type
    #[error("Asset kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: AssetKind, found: AssetKind },

    /// `load` was called before every source was set
    #[error("{kind} cannot load: {field} is not set")]
    MissingSource {
        kind: AssetKind,
        field: &'static str,
    },

    /// A value rejected before reaching the native core
    #[error("Invalid value for {property}: {reason}")]
    InvalidValue {
        property: &'static str,
        reason: String,
    },

    /// Scene not found in the director
    #[error("Scene '{0}' not registered")]
    SceneNotFound(String),

    /// Scene registered twice
    #[error("Scene '{0}' is already registered")]
    SceneAlreadyRegistered(String),

    /// Operation on a scene that has already been torn down
    #[error("Scene '{0}' has been retired")]
    SceneRetired(String),

    /// No scene to start with
    #[error("No start scene configured")]
    NoStartScene,

    /// A scene's asset loading failed; the scene was retired
    #[error("Scene '{scene}' failed to load assets: {source}")]
    LoadAssetsFailed {
        scene: String,
        #[source]
        source: Box<ScriptError>,
    },

    /// Error raised by user script code
    #[error("Script error: {0}")]
    Script(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScriptError {
    /// Create a script error from user code
    pub fn script(message: impl Into<String>) -> Self {
        ScriptError::Script(message.into())
    }

    /// Create an invalid value error
    pub fn invalid_value(property: &'static str, reason: impl Into<String>) -> Self {
        ScriptError::InvalidValue {
            property,
            reason: reason.into(),
        }
    }

    /// True when the underlying cause is an operation on a null handle
    pub fn is_null_handle(&self) -> bool {
        matches!(self, ScriptError::Native(e) if e.is_null_handle())
    }
}
