//! Integration tests for engine state hooks

use std::sync::Arc;

use tether_native::mirror::keys;
use tether_native::{
    HeadlessCore, KeyboardState, NativeBoundary, NativeError, StateRegion, WindowState,
};
use tether_script::*;

fn setup() -> (Arc<HeadlessCore>, Arc<dyn NativeBoundary>) {
    let core = Arc::new(HeadlessCore::new());
    let boundary: Arc<dyn NativeBoundary> = core.clone();
    (core, boundary)
}

#[test]
fn test_window_snapshot() {
    let (core, boundary) = setup();
    let ctx = Context::new(boundary).unwrap();

    let window = ctx.window().unwrap();
    assert_eq!((window.width, window.height), (1280, 720));
    assert!(!window.closed);

    core.set_window_state(WindowState {
        width: 800,
        height: 600,
        closed: false,
        resized: true,
    });
    let resized = ctx.window().unwrap();
    assert!(resized.resized);
    assert!(resized.size_changed(&window));
}

#[test]
fn test_snapshots_are_independent() {
    let (core, boundary) = setup();
    let ctx = Context::new(boundary).unwrap();
    let hook = ctx.state_hook::<WindowState>().unwrap();

    let before = hook.query().unwrap();
    core.set_window_state(WindowState {
        width: 1280,
        height: 720,
        closed: true,
        resized: false,
    });

    assert!(!before.closed);
    assert!(hook.query().unwrap().closed);
}

#[test]
fn test_keyboard_snapshot() {
    let (core, boundary) = setup();
    let ctx = Context::new(boundary).unwrap();
    let hook = ctx.state_hook::<KeyboardState>().unwrap();

    assert_eq!(hook.query().unwrap().pressed().count(), 0);

    core.set_key(keys::W, true);
    core.set_key(keys::SPACE, true);
    let keyboard = hook.query().unwrap();
    assert!(keyboard.is_down(keys::W));
    assert!(keyboard.is_down(keys::SPACE));
    assert!(!keyboard.is_down(keys::S));
    assert!(!keyboard.is_down(100_000));

    core.set_key(keys::W, false);
    assert!(!ctx.keyboard().unwrap().is_down(keys::W));
}

#[test]
fn test_short_region_is_an_error() {
    let (core, boundary) = setup();
    let ctx = Context::new(boundary).unwrap();
    core.truncate_region(StateRegion::Window, 8);

    let err = ctx.window().unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Native(NativeError::ShortBuffer { .. })
    ));
}

#[test]
fn test_unpublished_region_is_unreadable() {
    let (core, boundary) = setup();
    core.withdraw_region(StateRegion::Keyboard);
    let ctx = Context::new(boundary).unwrap();

    let err = ctx.state_hook::<KeyboardState>().unwrap_err();
    assert!(matches!(
        err,
        ScriptError::Native(NativeError::UnreadableRegion { .. })
    ));
    // Other regions still work
    assert!(ctx.window().is_ok());
}

#[test]
fn test_hook_clone_reads_same_region() {
    let (_core, boundary) = setup();
    let ctx = Context::new(boundary).unwrap();
    let hook = ctx.state_hook::<WindowState>().unwrap();
    let copy = hook.clone();

    assert_eq!(hook.region(), copy.region());
    assert_eq!(hook.query().unwrap(), copy.query().unwrap());
}
