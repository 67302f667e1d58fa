//! Integration tests for scenes, their members and transitions

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use glam::{UVec2, Vec3};
use tether_native::{AssetKind, HeadlessCore, NativeBoundary};
use tether_script::*;

fn setup() -> (Arc<HeadlessCore>, Context) {
    let core = Arc::new(HeadlessCore::new());
    let boundary: Arc<dyn NativeBoundary> = core.clone();
    (core, Context::new(boundary).unwrap())
}

fn empty_scene() -> impl FnMut(&Scene, &Context) -> Result<()> {
    |_, _| Ok(())
}

fn entered(ctx: &Context, name: &str) -> SceneDirector {
    let mut director = SceneDirector::new();
    director.register(name, empty_scene).unwrap();
    director.enter(name, ctx).unwrap();
    director
}

#[test]
fn test_register_rejects_duplicates() {
    let mut director = SceneDirector::new();
    director.register("Main", empty_scene).unwrap();

    let err = director.register("Main", empty_scene).unwrap_err();
    assert!(matches!(err, ScriptError::SceneAlreadyRegistered(name) if name == "Main"));
    assert!(matches!(
        director.set_start_scene("Missing"),
        Err(ScriptError::SceneNotFound(_))
    ));
    assert!(matches!(
        director.request("Missing"),
        Err(ScriptError::SceneNotFound(_))
    ));
}

#[test]
fn test_enter_activates_scene() {
    let (core, ctx) = setup();
    let director = entered(&ctx, "Main");

    let scene = director.active_scene().unwrap();
    assert_eq!(scene.name(), "Main");
    assert_eq!(scene.state(), SceneState::Active);
    assert!(core.is_alive(scene.handle()));
    assert_eq!(director.instances(), 1);
}

#[test]
fn test_shared_visual_is_one_native_object() {
    let (core, ctx) = setup();
    let director = entered(&ctx, "Main");
    let scene = director.active_scene().unwrap();

    let first = scene.new_game_object().unwrap();
    let second = scene.new_game_object().unwrap();
    let visual: Visual = ctx.assets().create("crate").unwrap();
    let alias: Visual = ctx.assets().create("crate").unwrap();

    first.set_visual(&visual).unwrap();
    second.set_visual(&alias).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        first.visual().unwrap().unwrap().handle(),
        second.visual().unwrap().unwrap().handle()
    );
    assert_eq!(core.asset_count(AssetKind::Visual), 1);

    second.clear_visual().unwrap();
    assert_eq!(second.visual().unwrap(), None);
}

#[test]
fn test_game_object_transform() {
    let (_core, ctx) = setup();
    let director = entered(&ctx, "Main");
    let object = director.active_scene().unwrap().new_game_object().unwrap();

    assert_eq!(object.scale().unwrap(), Vec3::ONE);
    object.set_position(Vec3::new(1.0, 2.0, 3.0)).unwrap();
    object.set_rotation(Vec3::new(0.0, 90.0, 0.0)).unwrap();
    object.set_scale(Vec3::splat(2.0)).unwrap();
    object.set_atlas_offset(UVec2::new(3, 0)).unwrap();

    assert_eq!(object.position().unwrap(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(object.rotation().unwrap(), Vec3::new(0.0, 90.0, 0.0));
    assert_eq!(object.scale().unwrap(), Vec3::splat(2.0));
    assert_eq!(object.atlas_offset().unwrap(), UVec2::new(3, 0));
}

#[test]
fn test_active_camera() {
    let (_core, ctx) = setup();
    let director = entered(&ctx, "Main");
    let scene = director.active_scene().unwrap();

    assert_eq!(scene.active_camera().unwrap(), None);

    let camera = scene.new_camera().unwrap();
    assert_eq!(camera.rotation().unwrap(), Vec3::ZERO);
    camera.set_position(Vec3::new(0.0, 1.0, 10.0)).unwrap();
    camera.set_rotation(Vec3::new(-15.0, 45.0, 0.0)).unwrap();
    scene.set_active_camera(&camera).unwrap();

    let active = scene.active_camera().unwrap().unwrap();
    assert_eq!(active, camera);
    assert_eq!(active.position().unwrap(), Vec3::new(0.0, 1.0, 10.0));
    assert_eq!(active.rotation().unwrap(), Vec3::new(-15.0, 45.0, 0.0));
}

#[test]
fn test_listener_defaults_and_orientation() {
    let (_core, ctx) = setup();
    let director = entered(&ctx, "Main");
    let listener = director.active_scene().unwrap().listener();

    assert_eq!(listener.volume().unwrap(), 0.5);
    assert_eq!(listener.position().unwrap(), Vec3::ZERO);
    assert_eq!(listener.orientation_at().unwrap(), Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(listener.orientation_up().unwrap(), Vec3::Y);

    listener.set_volume(0.9).unwrap();
    listener.set_orientation(Vec3::X, Vec3::Z).unwrap();
    assert_eq!(listener.volume().unwrap(), 0.9);
    assert_eq!(listener.orientation_at().unwrap(), Vec3::X);
    assert_eq!(listener.orientation_up().unwrap(), Vec3::Z);
}

#[test]
fn test_transition_retires_previous_scene() {
    let (core, ctx) = setup();
    let mut director = SceneDirector::new();
    director.register("Menu", empty_scene).unwrap();
    director.register("Level", empty_scene).unwrap();

    director.enter("Menu", &ctx).unwrap();
    let menu = director.active_scene().unwrap();
    let menu_handle = menu.handle();
    let player = menu.new_game_object().unwrap();

    director.request("Level").unwrap();
    assert_eq!(director.pending(), Some("Level"));
    assert!(director.apply_pending(&ctx).unwrap());
    assert!(!director.apply_pending(&ctx).unwrap());

    assert_eq!(director.active_scene().unwrap().name(), "Level");
    assert_eq!(core.scene_count(), 1);
    assert!(!core.is_alive(menu_handle));
    // Members of a retired scene are stale
    assert!(player.position().is_err());
}

#[test]
fn test_last_request_wins() {
    let (_core, ctx) = setup();
    let mut director = SceneDirector::new();
    for name in ["A", "B", "C"] {
        director.register(name, empty_scene).unwrap();
    }
    director.enter("A", &ctx).unwrap();

    director.request("B").unwrap();
    director.request("C").unwrap();
    director.apply_pending(&ctx).unwrap();

    assert_eq!(director.active_scene().unwrap().name(), "C");
    assert_eq!(director.instances(), 2);
}

#[test]
fn test_load_assets_runs_once_per_instance() {
    let (_core, ctx) = setup();
    let loads = Rc::new(RefCell::new(Vec::new()));
    let mut director = SceneDirector::new();

    let recorded = loads.clone();
    director
        .register("Main", move || {
            let recorded = recorded.clone();
            move |scene: &Scene, _: &Context| -> Result<()> {
                assert_eq!(scene.state(), SceneState::AssetsLoading);
                recorded.borrow_mut().push(scene.handle());
                Ok(())
            }
        })
        .unwrap();

    director.enter("Main", &ctx).unwrap();
    director.enter("Main", &ctx).unwrap();

    let loads = loads.borrow();
    assert_eq!(loads.len(), 2);
    assert_ne!(loads[0], loads[1]);
}

#[test]
fn test_failed_load_leaves_no_active_scene() {
    let (core, ctx) = setup();
    let mut director = SceneDirector::new();
    director.register("Main", empty_scene).unwrap();
    director
        .register("Broken", || {
            |_: &Scene, _: &Context| -> Result<()> { Err(ScriptError::script("missing asset")) }
        })
        .unwrap();

    director.enter("Main", &ctx).unwrap();
    let err = director.enter("Broken", &ctx).unwrap_err();

    assert!(matches!(err, ScriptError::LoadAssetsFailed { ref scene, .. } if scene == "Broken"));
    assert!(director.active_scene().is_none());
    assert_eq!(core.scene_count(), 0);
}

#[test]
fn test_retired_scene_rejects_calls() {
    let (_core, ctx) = setup();
    let mut director = SceneDirector::new();
    let kept = Rc::new(RefCell::new(None));

    let slot = kept.clone();
    director
        .register("Main", move || {
            let slot = slot.clone();
            move |scene: &Scene, _: &Context| -> Result<()> {
                *slot.borrow_mut() = Some(scene.new_camera()?);
                Ok(())
            }
        })
        .unwrap();
    director.enter("Main", &ctx).unwrap();
    director.retire_active().unwrap();

    assert!(director.active_scene().is_none());
    let camera = kept.borrow_mut().take().unwrap();
    assert!(camera.rotation().is_err());
}
