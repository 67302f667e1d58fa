//! Integration tests for the named asset registry

use std::sync::Arc;

use tether_native::{AssetKind, HeadlessCore, NativeBoundary, NativeHandle};
use tether_script::*;

fn registry() -> (Arc<HeadlessCore>, AssetRegistry) {
    let core = Arc::new(HeadlessCore::new());
    let boundary: Arc<dyn NativeBoundary> = core.clone();
    (core, AssetRegistry::from_boundary(boundary).unwrap())
}

#[test]
fn test_create_then_get_same_handle_for_every_kind() {
    let (_core, assets) = registry();

    for kind in AssetKind::ALL {
        let name = format!("asset_{kind}");
        let created = assets.create_any(kind, &name).unwrap();
        let found = assets.get_any(kind, &name).unwrap().unwrap();

        assert_eq!(created.kind(), kind);
        assert_eq!(created.handle(), found.handle());
        assert!(!created.handle().is_null());
    }
}

#[test]
fn test_has_tracks_creation() {
    let (_core, assets) = registry();

    assert!(!assets.has("crate").unwrap());
    let _texture: Texture = assets.create("crate").unwrap();
    assert!(assets.has("crate").unwrap());
}

#[test]
fn test_get_missing_is_none() {
    let (_core, assets) = registry();
    assert!(assets.get::<Visual>("nothing").unwrap().is_none());
    assert!(assets.get_any(AssetKind::Audio, "nothing").unwrap().is_none());
}

#[test]
fn test_create_twice_aliases() {
    let (core, assets) = registry();

    let first: Visual = assets.create("player").unwrap();
    let second: Visual = assets.create("player").unwrap();

    assert_eq!(first, second);
    assert_eq!(core.asset_count(AssetKind::Visual), 1);
}

#[test]
fn test_create_new_on_taken_name_fails() {
    let (_core, assets) = registry();
    let boundary: Arc<dyn NativeBoundary> = Arc::new(HeadlessCore::new());
    let manager = boundary.asset_manager().unwrap();

    Shader::create_new(&boundary, manager, "lit").unwrap();
    let err = Shader::create_new(&boundary, manager, "lit").unwrap_err();
    assert!(matches!(err, ScriptError::CreateFailed { kind: AssetKind::Shader, .. }));

    // The registry is unaffected by another core's names
    assert!(!assets.has("lit").unwrap());
}

#[test]
fn test_remove_makes_proxy_stale() {
    let (core, assets) = registry();
    let audio: Audio = assets.create("boom").unwrap();

    assert!(assets.remove("boom").unwrap());
    assert!(!assets.remove("boom").unwrap());
    assert!(!assets.has("boom").unwrap());
    assert!(!core.is_alive(audio.handle()));
    assert!(audio.volume().is_err());
}

#[test]
fn test_rename_and_name_of() {
    let (_core, assets) = registry();
    let mesh: MeshBuffer = assets.create("quad").unwrap();
    let _other: MeshBuffer = assets.create("tri").unwrap();

    assert_eq!(assets.name_of(&mesh).unwrap().as_deref(), Some("quad"));
    assert!(!assets.rename("quad", "tri").unwrap());
    assert!(assets.rename("quad", "square").unwrap());
    assert_eq!(assets.name_of(&mesh).unwrap().as_deref(), Some("square"));
    assert_eq!(assets.get::<MeshBuffer>("square").unwrap(), Some(mesh));
}

#[test]
fn test_null_proxy_fails_fast() {
    let (_core, assets) = registry();
    let boundary: Arc<dyn NativeBoundary> = Arc::new(HeadlessCore::new());
    let visual = Visual::bind_existing(&boundary, NativeHandle::null());

    assert!(visual.is_null());
    assert!(visual.atlas_size().unwrap_err().is_null_handle());
    assert!(visual.mesh().unwrap_err().is_null_handle());
    assert!(assets.name_of(&visual).unwrap_err().is_null_handle());
}

#[test]
fn test_asset_try_from_checks_kind() {
    let (_core, assets) = registry();
    let asset = assets.create_any(AssetKind::Texture, "sky").unwrap();

    let err = Visual::try_from(asset.clone()).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::KindMismatch {
            expected: AssetKind::Visual,
            found: AssetKind::Texture
        }
    ));

    let texture = Texture::try_from(asset).unwrap();
    assert_eq!(assets.get::<Texture>("sky").unwrap(), Some(texture));
}

#[test]
fn test_typed_and_untyped_views_agree() {
    let (_core, assets) = registry();
    let text: Text = assets.create("font").unwrap();
    let asset: Asset = text.clone().into();

    assert_eq!(asset.kind(), AssetKind::Text);
    assert_eq!(asset.handle(), text.handle());
}

#[test]
fn test_name_keeps_its_kind() {
    let (core, assets) = registry();
    let visual: Visual = assets.create("hero").unwrap();

    let err = assets.create::<Texture>("hero").unwrap_err();
    assert!(matches!(
        err,
        ScriptError::KindMismatch {
            expected: AssetKind::Texture,
            found: AssetKind::Visual
        }
    ));
    assert!(matches!(
        assets.get::<Audio>("hero"),
        Err(ScriptError::KindMismatch { .. })
    ));
    assert!(matches!(
        assets.get_any(AssetKind::Shader, "hero"),
        Err(ScriptError::KindMismatch { .. })
    ));
    assert!(matches!(
        assets.create_any(AssetKind::Text, "hero"),
        Err(ScriptError::KindMismatch { .. })
    ));

    // The original asset is untouched
    assert_eq!(assets.get::<Visual>("hero").unwrap(), Some(visual));
    assert_eq!(core.asset_count(AssetKind::Visual), 1);
    assert_eq!(core.asset_count(AssetKind::Texture), 0);
}
