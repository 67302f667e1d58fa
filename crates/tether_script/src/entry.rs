//! C ABI entry points handed to the native frame loop
//!
//! The native core owns the loop. It receives an [`FfiScriptHooks`] table and
//! calls `start` once, `update` once per frame and `destroy` at shutdown.
//! Errors and panics are logged here and reported as status codes; they
//! never unwind into native code.

use std::ffi::c_void;
use std::os::raw::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tether_native::ffi::{FfiScriptHooks, HOOK_ERROR, HOOK_INVALID, HOOK_OK, HOOK_PANIC};

use crate::error::Result;
use crate::runtime::Runtime;

impl Runtime {
    /// Move the runtime behind a C ABI hook table.
    ///
    /// The runtime is released by the table's `destroy` entry.
    pub fn into_ffi_hooks(self) -> FfiScriptHooks {
        let runtime = Box::into_raw(Box::new(self)) as *mut c_void;
        FfiScriptHooks {
            runtime,
            start: Some(hook_start),
            update: Some(hook_update),
            destroy: Some(hook_destroy),
        }
    }
}

fn with_runtime(
    runtime: *mut c_void,
    stage: &'static str,
    f: impl FnOnce(&mut Runtime) -> Result<()>,
) -> c_int {
    if runtime.is_null() {
        log::error!("Script hook '{}' called with a null runtime", stage);
        return HOOK_INVALID;
    }
    // Safety: produced by `into_ffi_hooks` and not yet destroyed
    let runtime = unsafe { &mut *(runtime as *mut Runtime) };

    match catch_unwind(AssertUnwindSafe(|| f(runtime))) {
        Ok(Ok(())) => HOOK_OK,
        Ok(Err(err)) => {
            log::error!("Script hook '{}' failed: {}", stage, err);
            HOOK_ERROR
        }
        Err(_) => {
            log::error!("Script hook '{}' panicked", stage);
            HOOK_PANIC
        }
    }
}

extern "C" fn hook_start(runtime: *mut c_void) -> c_int {
    with_runtime(runtime, "start", Runtime::start)
}

extern "C" fn hook_update(runtime: *mut c_void) -> c_int {
    with_runtime(runtime, "update", Runtime::update)
}

extern "C" fn hook_destroy(runtime: *mut c_void) {
    if runtime.is_null() {
        return;
    }
    // Safety: produced by `into_ffi_hooks`; the native core calls destroy once
    let mut runtime = unsafe { Box::from_raw(runtime as *mut Runtime) };
    let stopped = catch_unwind(AssertUnwindSafe(move || {
        let result = runtime.stop();
        drop(runtime);
        result
    }));
    match stopped {
        Ok(Ok(())) => {}
        Ok(Err(err)) => log::warn!("Stopping runtime failed: {}", err),
        Err(_) => log::error!("Stopping runtime panicked"),
    }
}
