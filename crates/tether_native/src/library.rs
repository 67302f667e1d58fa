//! Dynamic library loading for the native core
//!
//! Resolves the exported API table from a shared library and checks its
//! version before any call goes through it.

use crate::error::{NativeError, Result};
use crate::ffi::*;
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};

/// Information about a loaded native core
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library file path
    pub path: PathBuf,
    /// Library name
    pub name: String,
    /// Symbol the table was resolved from
    pub symbol: String,
    /// API version reported by the table
    pub api_version: u32,
}

/// A loaded native core library and its API table
pub struct NativeLibrary {
    /// Keeps the table's code mapped for as long as this value lives
    _library: Library,
    api: *const NativeApi,
    pub info: LibraryInfo,
}

// Safety: the table is immutable after load and the library handle is thread-safe
unsafe impl Send for NativeLibrary {}
unsafe impl Sync for NativeLibrary {}

impl NativeLibrary {
    /// Load a native core exporting [`DEFAULT_API_SYMBOL`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_symbol(path, DEFAULT_API_SYMBOL)
    }

    /// Load a native core exporting its table under `symbol`
    pub fn load_with_symbol(path: impl AsRef<Path>, symbol: &str) -> Result<Self> {
        let path = path.as_ref();

        let library = unsafe {
            Library::new(path).map_err(|e| NativeError::load_error(path, e.to_string()))?
        };

        let get_api: Symbol<GetNativeApiFn> = unsafe {
            library
                .get(symbol.as_bytes())
                .map_err(|_| NativeError::symbol_not_found(path.display().to_string(), symbol))?
        };

        let api = get_api();
        if api.is_null() {
            return Err(NativeError::load_error(
                path,
                format!("'{symbol}' returned a null API table"),
            ));
        }

        let api_version = unsafe { (*api).api_version };
        check_version(api_version)?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let info = LibraryInfo {
            path: path.to_path_buf(),
            name,
            symbol: symbol.to_string(),
            api_version,
        };

        log::info!(
            "Loaded native core '{}' (API v{}) from {}",
            info.name,
            info.api_version,
            info.path.display()
        );

        Ok(Self {
            _library: library,
            api,
            info,
        })
    }

    /// The resolved API table
    pub fn api(&self) -> &NativeApi {
        // Safety: checked non-null at load and valid while the library is mapped
        unsafe { &*self.api }
    }
}

impl std::fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeLibrary").field("info", &self.info).finish()
    }
}

pub(crate) fn check_version(api_version: u32) -> Result<()> {
    if api_version != TETHER_NATIVE_API_VERSION {
        return Err(NativeError::VersionMismatch {
            library_version: api_version,
            expected_version: TETHER_NATIVE_API_VERSION,
        });
    }
    Ok(())
}
