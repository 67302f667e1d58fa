//! Opaque handles to native-owned objects

use std::ffi::c_void;
use std::fmt;

/// Address-sized token naming an object owned by the native core.
///
/// The scripting layer never dereferences a handle. It only compares handles
/// and passes them back across the boundary. A null handle means "no object".
/// Handles do not own anything; lifetime is decided by the native core.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle {
    ptr: *mut c_void,
}

impl NativeHandle {
    /// The null handle
    pub const fn null() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
        }
    }

    /// Wrap a raw pointer handed out by the native core
    pub const fn from_ptr(ptr: *mut c_void) -> Self {
        Self { ptr }
    }

    /// Build a handle from a plain address
    pub fn from_addr(addr: usize) -> Self {
        Self {
            ptr: addr as *mut c_void,
        }
    }

    /// Check if handle is null
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Raw pointer for passing back across the boundary
    pub fn as_ptr(&self) -> *mut c_void {
        self.ptr
    }

    /// Numeric address, used for logging and ordering
    pub fn addr(&self) -> usize {
        self.ptr as usize
    }

    /// `None` for the null handle, `Some(self)` otherwise
    pub fn non_null(self) -> Option<Self> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "NativeHandle(null)")
        } else {
            write!(f, "NativeHandle({:#x})", self.addr())
        }
    }
}

// Handles are inert tokens; the native core serializes access to the objects they name.
unsafe impl Send for NativeHandle {}
unsafe impl Sync for NativeHandle {}
