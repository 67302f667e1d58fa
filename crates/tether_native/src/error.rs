//! Error types for the native boundary

use std::path::PathBuf;
use thiserror::Error;

use crate::handle::NativeHandle;

/// Result type for boundary operations
pub type Result<T> = std::result::Result<T, NativeError>;

/// Errors that can occur while talking to the native core
#[derive(Debug, Error)]
pub enum NativeError {
    /// An operation was attempted through a null handle
    #[error("'{operation}' called on a null handle")]
    NullHandle { operation: &'static str },

    /// The native core does not recognise the handle (stale or foreign)
    #[error("'{operation}' called on unknown handle {handle:?}")]
    UnknownHandle {
        operation: &'static str,
        handle: NativeHandle,
    },

    /// The loaded API table does not provide an entry point
    #[error("Native entry point '{0}' is not provided")]
    MissingEntryPoint(&'static str),

    /// The native call itself reported failure
    #[error("Native call '{operation}' failed: {reason}")]
    CallFailed {
        operation: &'static str,
        reason: String,
    },

    /// The native core rejected an argument
    #[error("Invalid argument to '{operation}': {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// A string could not cross the boundary
    #[error("String passed to '{operation}' contains an interior NUL or invalid UTF-8")]
    InvalidString { operation: &'static str },

    /// A mirrored struct was decoded from fewer bytes than its layout needs
    #[error("{layout} needs {needed} bytes, only {available} available")]
    ShortBuffer {
        layout: &'static str,
        needed: usize,
        available: usize,
    },

    /// A state region could not be read
    #[error("State region for {layout} is not readable: {reason}")]
    UnreadableRegion {
        layout: &'static str,
        reason: String,
    },

    /// Failed to load dynamic library
    #[error("Failed to load library '{path}': {message}")]
    LoadError { path: PathBuf, message: String },

    /// Library does not contain required symbol
    #[error("Symbol '{symbol}' not found in library '{library}'")]
    SymbolNotFound { library: String, symbol: String },

    /// Version mismatch
    #[error("Version mismatch: library version {library_version}, expected {expected_version}")]
    VersionMismatch {
        library_version: u32,
        expected_version: u32,
    },
}

impl NativeError {
    /// Create a null handle error
    pub fn null_handle(operation: &'static str) -> Self {
        NativeError::NullHandle { operation }
    }

    /// Create an unknown handle error
    pub fn unknown_handle(operation: &'static str, handle: NativeHandle) -> Self {
        NativeError::UnknownHandle { operation, handle }
    }

    /// Create a call failed error
    pub fn call_failed(operation: &'static str, reason: impl Into<String>) -> Self {
        NativeError::CallFailed {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        NativeError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a load error
    pub fn load_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        NativeError::LoadError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a symbol not found error
    pub fn symbol_not_found(library: impl Into<String>, symbol: impl Into<String>) -> Self {
        NativeError::SymbolNotFound {
            library: library.into(),
            symbol: symbol.into(),
        }
    }

    /// True when the error is the fail-fast null handle guard
    pub fn is_null_handle(&self) -> bool {
        matches!(self, NativeError::NullHandle { .. })
    }
}
