//! Integration tests for the native boundary, driven through the headless core

use std::sync::Arc;

use glam::{UVec2, Vec2, Vec3};
use tether_native::*;

fn core() -> (Arc<HeadlessCore>, Arc<dyn NativeBoundary>) {
    let core = Arc::new(HeadlessCore::new());
    let boundary: Arc<dyn NativeBoundary> = core.clone();
    (core, boundary)
}

#[test]
fn test_asset_lifecycle_through_trait_object() {
    let (core, native) = core();
    let manager = native.asset_manager().unwrap();
    assert!(!manager.is_null());

    let visual = native.asset_create(manager, AssetKind::Visual, "hero").unwrap();
    assert!(!visual.is_null());
    assert_eq!(native.asset_get(manager, "hero").unwrap(), visual);
    assert!(native.asset_exists(manager, "hero").unwrap());
    assert_eq!(core.kind_of(visual), Some(ObjectKind::Asset(AssetKind::Visual)));

    assert!(native.asset_rename(manager, "hero", "villain").unwrap());
    assert!(native.asset_get(manager, "hero").unwrap().is_null());
    assert_eq!(
        native.asset_name(manager, visual).unwrap().as_deref(),
        Some("villain")
    );

    assert!(native.asset_remove(manager, "villain").unwrap());
    assert!(!native.asset_remove(manager, "villain").unwrap());
    assert!(!core.is_alive(visual));
}

#[test]
fn test_duplicate_create_returns_null() {
    let (_core, native) = core();
    let manager = native.asset_manager().unwrap();

    let first = native.asset_create(manager, AssetKind::Texture, "bricks").unwrap();
    let second = native.asset_create(manager, AssetKind::Texture, "bricks").unwrap();

    assert!(!first.is_null());
    assert!(second.is_null());
}

#[test]
fn test_null_and_stale_handles_rejected() {
    let (_core, native) = core();
    let manager = native.asset_manager().unwrap();

    let err = native
        .get_vec3(NativeHandle::null(), Property::Position)
        .unwrap_err();
    assert!(err.is_null_handle());

    let audio = native.asset_create(manager, AssetKind::Audio, "step").unwrap();
    native.asset_remove(manager, "step").unwrap();
    let err = native.get_f32(audio, Property::Volume).unwrap_err();
    assert!(matches!(err, NativeError::UnknownHandle { .. }));
}

#[test]
fn test_property_defaults_and_round_trips() {
    let (_core, native) = core();
    let scene = native.scene_open("Main").unwrap();
    let object = native.scene_spawn(scene, MemberKind::GameObject).unwrap();

    assert_eq!(native.get_vec3(object, Property::Scale).unwrap(), Vec3::ONE);
    assert_eq!(native.get_vec3(object, Property::Position).unwrap(), Vec3::ZERO);

    native
        .set_vec3(object, Property::Position, Vec3::new(1.0, 2.0, 3.0))
        .unwrap();
    native
        .set_uvec2(object, Property::AtlasOffset, UVec2::new(2, 1))
        .unwrap();
    assert_eq!(
        native.get_vec3(object, Property::Position).unwrap(),
        Vec3::new(1.0, 2.0, 3.0)
    );
    assert_eq!(
        native.get_uvec2(object, Property::AtlasOffset).unwrap(),
        UVec2::new(2, 1)
    );

    // Listener values live on the scene itself
    assert_eq!(native.get_f32(scene, Property::ListenerVolume).unwrap(), 0.5);
    assert_eq!(
        native.get_vec3(scene, Property::ListenerAt).unwrap(),
        Vec3::new(0.0, 0.0, -1.0)
    );
}

#[test]
fn test_property_type_and_owner_checked() {
    let (_core, native) = core();
    let scene = native.scene_open("Main").unwrap();
    let camera = native.scene_spawn(scene, MemberKind::Camera).unwrap();

    // Cameras have no scale
    assert!(native.get_vec3(camera, Property::Scale).is_err());
    // Position is a vec3, not an f32
    assert!(native.set_f32(camera, Property::Position, 1.0).is_err());
}

#[test]
fn test_links_check_target_kind() {
    let (_core, native) = core();
    let manager = native.asset_manager().unwrap();
    let visual = native.asset_create(manager, AssetKind::Visual, "v").unwrap();
    let mesh = native.asset_create(manager, AssetKind::MeshBuffer, "m").unwrap();
    let texture = native.asset_create(manager, AssetKind::Texture, "t").unwrap();

    native.set_link(visual, Link::Mesh, 0, mesh).unwrap();
    assert_eq!(native.get_link(visual, Link::Mesh, 0).unwrap(), mesh);

    assert!(native.set_link(visual, Link::Mesh, 0, texture).is_err());

    native.set_link(visual, Link::Texture, 3, texture).unwrap();
    assert_eq!(native.get_link(visual, Link::Texture, 3).unwrap(), texture);
    assert!(native.get_link(visual, Link::Texture, 0).unwrap().is_null());

    native
        .set_link(visual, Link::Mesh, 0, NativeHandle::null())
        .unwrap();
    assert!(native.get_link(visual, Link::Mesh, 0).unwrap().is_null());
}

#[test]
fn test_removed_asset_unlinked() {
    let (_core, native) = core();
    let manager = native.asset_manager().unwrap();
    let visual = native.asset_create(manager, AssetKind::Visual, "v").unwrap();
    let shader = native.asset_create(manager, AssetKind::Shader, "s").unwrap();

    native.set_link(visual, Link::Shader, 0, shader).unwrap();
    native.asset_remove(manager, "s").unwrap();

    assert!(native.get_link(visual, Link::Shader, 0).unwrap().is_null());
}

#[test]
fn test_active_camera_must_belong_to_scene() {
    let (_core, native) = core();
    let first = native.scene_open("A").unwrap();
    let second = native.scene_open("B").unwrap();
    let camera = native.scene_spawn(first, MemberKind::Camera).unwrap();

    assert!(native.set_link(second, Link::ActiveCamera, 0, camera).is_err());
    native.set_link(first, Link::ActiveCamera, 0, camera).unwrap();
    assert_eq!(native.get_link(first, Link::ActiveCamera, 0).unwrap(), camera);
}

#[test]
fn test_scene_close_destroys_members() {
    let (core, native) = core();
    let scene = native.scene_open("Level").unwrap();
    let object = native.scene_spawn(scene, MemberKind::GameObject).unwrap();
    assert_eq!(core.scene_count(), 1);

    native.scene_close(scene).unwrap();

    assert_eq!(core.scene_count(), 0);
    assert!(!core.is_alive(object));
    assert!(native.get_vec3(object, Property::Position).is_err());
}

#[test]
fn test_load_validates_sources() {
    let (core, native) = core();
    let manager = native.asset_manager().unwrap();
    let shader = native.asset_create(manager, AssetKind::Shader, "s").unwrap();

    assert!(native.load(shader, &["only vertex"]).is_err());
    assert!(native.load(shader, &["vs", ""]).is_err());
    assert_eq!(core.load_count(shader), 0);

    native.load(shader, &["vs", "fs"]).unwrap();
    assert_eq!(core.load_count(shader), 1);
    assert_eq!(
        core.sources(shader),
        Some(vec!["vs".to_string(), "fs".to_string()])
    );
}

#[test]
fn test_mesh_uploads() {
    let (core, native) = core();
    let manager = native.asset_manager().unwrap();
    let mesh = native.asset_create(manager, AssetKind::MeshBuffer, "quad").unwrap();

    native
        .upload_f32(mesh, BufferKind::Vertices, &[0.0, 1.0, 2.0])
        .unwrap();
    native.upload_u32(mesh, BufferKind::Indices, &[0, 1, 2]).unwrap();
    assert!(native.upload_f32(mesh, BufferKind::Indices, &[0.0]).is_err());

    assert_eq!(
        core.float_buffer(mesh, BufferKind::Vertices),
        Some(vec![0.0, 1.0, 2.0])
    );
    assert_eq!(core.indices(mesh), Some(vec![0, 1, 2]));
}

#[test]
fn test_audio_transport() {
    let (core, native) = core();
    let manager = native.asset_manager().unwrap();
    let audio = native.asset_create(manager, AssetKind::Audio, "music").unwrap();

    assert_eq!(core.playback(audio), Some(Playback::Stopped));
    native.audio_command(audio, AudioCommand::Pause).unwrap();
    assert_eq!(core.playback(audio), Some(Playback::Stopped));
    native.audio_command(audio, AudioCommand::Play).unwrap();
    native.audio_command(audio, AudioCommand::Pause).unwrap();
    assert_eq!(core.playback(audio), Some(Playback::Paused));
    native.audio_command(audio, AudioCommand::Stop).unwrap();
    assert_eq!(core.playback(audio), Some(Playback::Stopped));
}

#[test]
fn test_text_slots_are_owned_by_text() {
    let (core, native) = core();
    let manager = native.asset_manager().unwrap();
    let text = native.asset_create(manager, AssetKind::Text, "font").unwrap();

    let slot = native.text_slot(text, "score").unwrap();
    assert_eq!(native.text_slot(text, "score").unwrap(), slot);
    assert!(native.get_bool(slot, Property::SlotVisible).unwrap());

    native
        .set_vec2(slot, Property::SlotPosition, Vec2::new(4.0, 8.0))
        .unwrap();
    native.set_string(slot, Property::SlotContent, "100").unwrap();
    assert_eq!(native.get_string(slot, Property::SlotContent).unwrap(), "100");

    assert!(native.text_remove_slot(text, "score").unwrap());
    assert!(!core.is_alive(slot));
    assert!(!native.text_remove_slot(text, "score").unwrap());
}

#[test]
fn test_window_region_decodes() {
    let (core, native) = core();
    core.set_window_state(WindowState {
        width: 640,
        height: 480,
        closed: true,
        resized: true,
    });

    let region = native.state_region(StateRegion::Window).unwrap();
    let mut bytes = vec![0u8; WindowState::SIZE];
    native.read_region(region, &mut bytes).unwrap();
    let window = WindowState::from_bytes(&bytes).unwrap();

    assert_eq!(window.width, 640);
    assert_eq!(window.height, 480);
    assert!(window.closed);
    assert!(window.resized);
}

#[test]
fn test_keyboard_region_decodes() {
    let (core, native) = core();
    core.set_key(mirror::keys::SPACE, true);

    let region = native.state_region(StateRegion::Keyboard).unwrap();
    let mut bytes = vec![0u8; KeyboardState::SIZE];
    native.read_region(region, &mut bytes).unwrap();
    let keyboard = KeyboardState::from_bytes(&bytes).unwrap();

    assert!(keyboard.is_down(mirror::keys::SPACE));
    assert_eq!(keyboard.pressed().collect::<Vec<_>>(), vec![mirror::keys::SPACE]);
}

#[test]
fn test_short_region_read_fails() {
    let (core, native) = core();
    core.truncate_region(StateRegion::Window, 4);

    let region = native.state_region(StateRegion::Window).unwrap();
    let mut bytes = vec![0u8; WindowState::SIZE];
    let err = native.read_region(region, &mut bytes).unwrap_err();
    assert!(matches!(err, NativeError::ShortBuffer { .. }));
}

#[test]
fn test_withdrawn_region_is_null() {
    let (core, native) = core();
    core.withdraw_region(StateRegion::Keyboard);
    assert!(native.state_region(StateRegion::Keyboard).unwrap().is_null());
}

#[test]
fn test_withdrawn_region_stops_reading() {
    let (core, native) = core();
    let region = native.state_region(StateRegion::Keyboard).unwrap();
    core.withdraw_region(StateRegion::Keyboard);

    let mut bytes = vec![0u8; KeyboardState::SIZE];
    let err = native.read_region(region, &mut bytes).unwrap_err();
    assert!(matches!(err, NativeError::UnreadableRegion { .. }));
}

#[test]
fn test_asset_kind_follows_the_name() {
    let (_core, native) = core();
    let manager = native.asset_manager().unwrap();
    let texture = native.asset_create(manager, AssetKind::Texture, "bricks").unwrap();

    assert_eq!(
        native.asset_kind(manager, texture).unwrap(),
        Some(AssetKind::Texture)
    );
    native.asset_remove(manager, "bricks").unwrap();
    assert!(native.asset_kind(manager, texture).is_err());
}
