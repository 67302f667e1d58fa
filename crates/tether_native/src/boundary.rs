//! Safe face of the foreign call boundary
//!
//! [`NativeBoundary`] is the only way the scripting layer reaches the native
//! core. Each method maps to one entry of the C ABI table in [`crate::ffi`].
//! Calls are synchronous and run in program order; nothing is retried.

use glam::{UVec2, Vec2, Vec3};

use crate::error::Result;
use crate::ffi::{AssetKind, AudioCommand, BufferKind, Link, MemberKind, Property, StateRegion};
use crate::handle::NativeHandle;

/// Operations the native core exposes to scripts.
///
/// Handles returned by the `*_create`, `*_get`, `text_slot`, `scene_*` and
/// `state_region` methods may be null; interpreting null is up to the
/// caller. Passing a stale handle is a precondition violation that an
/// implementation may or may not detect.
pub trait NativeBoundary: Send + Sync {
    // Asset manager

    /// Handle of the process asset manager
    fn asset_manager(&self) -> Result<NativeHandle>;

    /// Allocate a new asset; null when `name` is already taken
    fn asset_create(&self, manager: NativeHandle, kind: AssetKind, name: &str)
        -> Result<NativeHandle>;

    /// Look up an asset by name; null when absent
    fn asset_get(&self, manager: NativeHandle, name: &str) -> Result<NativeHandle>;

    fn asset_exists(&self, manager: NativeHandle, name: &str) -> Result<bool>;

    /// Forget an asset; false when absent
    fn asset_remove(&self, manager: NativeHandle, name: &str) -> Result<bool>;

    /// Rename an asset; false when `from` is absent or `to` is taken
    fn asset_rename(&self, manager: NativeHandle, from: &str, to: &str) -> Result<bool>;

    /// Registered name of an asset, if it belongs to `manager`
    fn asset_name(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<String>>;

    /// Kind an asset was created as; `None` if it is not an asset of `manager`
    fn asset_kind(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<AssetKind>>;

    // Loading and commands

    /// Hand buffered source strings to the native loader
    fn load(&self, target: NativeHandle, sources: &[&str]) -> Result<()>;

    fn upload_f32(&self, target: NativeHandle, buffer: BufferKind, data: &[f32]) -> Result<()>;

    fn upload_u32(&self, target: NativeHandle, buffer: BufferKind, data: &[u32]) -> Result<()>;

    fn audio_command(&self, target: NativeHandle, command: AudioCommand) -> Result<()>;

    // Typed property channels

    fn get_f32(&self, target: NativeHandle, property: Property) -> Result<f32>;
    fn set_f32(&self, target: NativeHandle, property: Property, value: f32) -> Result<()>;

    fn get_bool(&self, target: NativeHandle, property: Property) -> Result<bool>;
    fn set_bool(&self, target: NativeHandle, property: Property, value: bool) -> Result<()>;

    fn get_vec2(&self, target: NativeHandle, property: Property) -> Result<Vec2>;
    fn set_vec2(&self, target: NativeHandle, property: Property, value: Vec2) -> Result<()>;

    fn get_vec3(&self, target: NativeHandle, property: Property) -> Result<Vec3>;
    fn set_vec3(&self, target: NativeHandle, property: Property, value: Vec3) -> Result<()>;

    fn get_uvec2(&self, target: NativeHandle, property: Property) -> Result<UVec2>;
    fn set_uvec2(&self, target: NativeHandle, property: Property, value: UVec2) -> Result<()>;

    fn get_string(&self, target: NativeHandle, property: Property) -> Result<String>;
    fn set_string(&self, target: NativeHandle, property: Property, value: &str) -> Result<()>;

    // Relations

    /// Follow a relation; null when unset. `slot` is only meaningful for textures.
    fn get_link(&self, target: NativeHandle, link: Link, slot: i32) -> Result<NativeHandle>;

    /// Set or clear (null `value`) a relation
    fn set_link(&self, target: NativeHandle, link: Link, slot: i32, value: NativeHandle)
        -> Result<()>;

    // Text slots

    /// Slot named `name`, created on first access
    fn text_slot(&self, text: NativeHandle, name: &str) -> Result<NativeHandle>;

    fn text_remove_slot(&self, text: NativeHandle, name: &str) -> Result<bool>;

    // Scenes

    /// Construct the native side of a scene
    fn scene_open(&self, name: &str) -> Result<NativeHandle>;

    /// Destroy a scene and every object spawned through it
    fn scene_close(&self, scene: NativeHandle) -> Result<()>;

    fn scene_spawn(&self, scene: NativeHandle, member: MemberKind) -> Result<NativeHandle>;

    // Engine state

    /// Raw address of a fixed-layout engine state struct
    fn state_region(&self, region: StateRegion) -> Result<NativeHandle>;

    /// Copy `out.len()` bytes starting at a region address.
    ///
    /// Only addresses previously returned by `state_region` are readable.
    /// Anything else fails with `UnreadableRegion`, and a read past the
    /// published length fails with `ShortBuffer`.
    fn read_region(&self, region: NativeHandle, out: &mut [u8]) -> Result<()>;
}
