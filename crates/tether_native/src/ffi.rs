//! FFI types and function signatures for the native core
//!
//! This module defines the C ABI shared with the native core. Every type
//! crossing the boundary is `#[repr(C)]` and every numeric id is a fixed
//! `u32` discriminant so both sides agree on it without shared headers.

use std::ffi::{c_char, c_void};
use std::fmt;
use std::os::raw::c_int;

use crate::handle::NativeHandle;

/// API version for compatibility checking
pub const TETHER_NATIVE_API_VERSION: u32 = 1;

/// Default exported symbol returning the [`NativeApi`] table
pub const DEFAULT_API_SYMBOL: &str = "tether_native_api";

/// Status code returned by native commands on success
pub const STATUS_OK: c_int = 0;

// ============================================================================
// Vector types
// ============================================================================

/// Vector2 for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FfiVec2 {
    pub x: f32,
    pub y: f32,
}

impl FfiVec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for FfiVec2 {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<FfiVec2> for glam::Vec2 {
    fn from(v: FfiVec2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

/// Vector3 for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FfiVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl FfiVec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for FfiVec3 {
    fn from(v: glam::Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<FfiVec3> for glam::Vec3 {
    fn from(v: FfiVec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// Unsigned 2-component vector (atlas cells)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FfiUVec2 {
    pub x: u32,
    pub y: u32,
}

impl FfiUVec2 {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<glam::UVec2> for FfiUVec2 {
    fn from(v: glam::UVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<FfiUVec2> for glam::UVec2 {
    fn from(v: FfiUVec2) -> Self {
        glam::UVec2::new(v.x, v.y)
    }
}

// ============================================================================
// Boundary ids
// ============================================================================

/// Kind of asset the native asset manager can allocate
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Visual = 0,
    Shader = 1,
    MeshBuffer = 2,
    Texture = 3,
    Audio = 4,
    Text = 5,
}

impl AssetKind {
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Visual,
        AssetKind::Shader,
        AssetKind::MeshBuffer,
        AssetKind::Texture,
        AssetKind::Audio,
        AssetKind::Text,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| *kind as u32 == raw)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Visual => "Visual",
            AssetKind::Shader => "Shader",
            AssetKind::MeshBuffer => "MeshBuffer",
            AssetKind::Texture => "Texture",
            AssetKind::Audio => "Audio",
            AssetKind::Text => "Text",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value type carried by a property channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    F32,
    Bool,
    Vec2,
    Vec3,
    UVec2,
    String,
}

/// Scalar and vector properties reachable through the typed channels
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// GameObject, Camera, Audio
    Position = 0,
    /// GameObject, Camera
    Rotation = 1,
    /// GameObject
    Scale = 2,
    /// GameObject: cell inside its Visual's texture atlas
    AtlasOffset = 3,
    /// Visual: atlas columns and rows
    AtlasSize = 4,
    /// Audio
    Pitch = 5,
    /// Audio
    Volume = 6,
    /// Audio
    Velocity = 7,
    /// Audio
    Looping = 8,
    /// TextSlot
    SlotPosition = 9,
    /// TextSlot
    SlotContent = 10,
    /// TextSlot
    SlotVisible = 11,
    /// Scene listener
    ListenerPosition = 12,
    /// Scene listener
    ListenerVolume = 13,
    /// Scene listener facing direction
    ListenerAt = 14,
    /// Scene listener up direction
    ListenerUp = 15,
}

impl Property {
    pub const ALL: [Property; 16] = [
        Property::Position,
        Property::Rotation,
        Property::Scale,
        Property::AtlasOffset,
        Property::AtlasSize,
        Property::Pitch,
        Property::Volume,
        Property::Velocity,
        Property::Looping,
        Property::SlotPosition,
        Property::SlotContent,
        Property::SlotVisible,
        Property::ListenerPosition,
        Property::ListenerVolume,
        Property::ListenerAt,
        Property::ListenerUp,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| *p as u32 == raw)
    }

    /// The channel this property travels through
    pub fn value_type(&self) -> ValueType {
        match self {
            Property::Pitch | Property::Volume | Property::ListenerVolume => ValueType::F32,
            Property::Looping | Property::SlotVisible => ValueType::Bool,
            Property::SlotPosition => ValueType::Vec2,
            Property::AtlasOffset | Property::AtlasSize => ValueType::UVec2,
            Property::SlotContent => ValueType::String,
            Property::Position
            | Property::Rotation
            | Property::Scale
            | Property::Velocity
            | Property::ListenerPosition
            | Property::ListenerAt
            | Property::ListenerUp => ValueType::Vec3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Property::Position => "position",
            Property::Rotation => "rotation",
            Property::Scale => "scale",
            Property::AtlasOffset => "atlas_offset",
            Property::AtlasSize => "atlas_size",
            Property::Pitch => "pitch",
            Property::Volume => "volume",
            Property::Velocity => "velocity",
            Property::Looping => "looping",
            Property::SlotPosition => "slot_position",
            Property::SlotContent => "slot_content",
            Property::SlotVisible => "slot_visible",
            Property::ListenerPosition => "listener_position",
            Property::ListenerVolume => "listener_volume",
            Property::ListenerAt => "listener_at",
            Property::ListenerUp => "listener_up",
        }
    }
}

/// Handle-valued relations between native objects
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    /// Visual -> MeshBuffer
    Mesh = 0,
    /// Visual -> Shader, Text -> Shader
    Shader = 1,
    /// Visual -> Texture, keyed by slot
    Texture = 2,
    /// GameObject -> Visual
    Visual = 3,
    /// Scene -> Camera
    ActiveCamera = 4,
}

impl Link {
    pub const ALL: [Link; 5] = [
        Link::Mesh,
        Link::Shader,
        Link::Texture,
        Link::Visual,
        Link::ActiveCamera,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| *l as u32 == raw)
    }
}

/// Objects a scene can spawn
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    GameObject = 0,
    Camera = 1,
}

impl MemberKind {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(MemberKind::GameObject),
            1 => Some(MemberKind::Camera),
            _ => None,
        }
    }
}

/// Bulk buffers uploaded to a MeshBuffer
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    Vertices = 0,
    Indices = 1,
    Uvs = 2,
}

impl BufferKind {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(BufferKind::Vertices),
            1 => Some(BufferKind::Indices),
            2 => Some(BufferKind::Uvs),
            _ => None,
        }
    }
}

/// Audio transport commands
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCommand {
    Play = 0,
    Pause = 1,
    Stop = 2,
}

impl AudioCommand {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(AudioCommand::Play),
            1 => Some(AudioCommand::Pause),
            2 => Some(AudioCommand::Stop),
            _ => None,
        }
    }
}

/// Fixed-layout engine state structs exposed by raw address
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateRegion {
    Window = 0,
    Keyboard = 1,
}

impl StateRegion {
    pub const ALL: [StateRegion; 2] = [StateRegion::Window, StateRegion::Keyboard];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| *r as u32 == raw)
    }
}

// ============================================================================
// Native API table
// ============================================================================

/// Function table exported by the native core.
///
/// Strings passed in are NUL-terminated UTF-8. Strings passed out use the
/// caller-buffer protocol: the function writes at most `cap` bytes into `buf`
/// and returns the full byte length, so a second call with a larger buffer
/// retrieves the rest. Commands return [`STATUS_OK`] on success.
#[repr(C)]
pub struct NativeApi {
    /// API version the native core was built with
    pub api_version: u32,

    // Asset manager
    pub asset_manager: Option<extern "C" fn() -> NativeHandle>,
    pub asset_create: Option<extern "C" fn(NativeHandle, u32, *const c_char) -> NativeHandle>,
    pub asset_get: Option<extern "C" fn(NativeHandle, *const c_char) -> NativeHandle>,
    pub asset_exists: Option<extern "C" fn(NativeHandle, *const c_char) -> bool>,
    pub asset_remove: Option<extern "C" fn(NativeHandle, *const c_char) -> bool>,
    pub asset_rename: Option<extern "C" fn(NativeHandle, *const c_char, *const c_char) -> bool>,
    pub asset_name: Option<extern "C" fn(NativeHandle, NativeHandle, *mut c_char, usize) -> usize>,
    /// [`AssetKind`] discriminant of a registered asset, or a negative value
    pub asset_kind: Option<extern "C" fn(NativeHandle, NativeHandle) -> i32>,

    // Loading and commands
    pub load: Option<extern "C" fn(NativeHandle, *const *const c_char, usize) -> c_int>,
    pub upload_f32: Option<extern "C" fn(NativeHandle, u32, *const f32, usize) -> c_int>,
    pub upload_u32: Option<extern "C" fn(NativeHandle, u32, *const u32, usize) -> c_int>,
    pub audio_command: Option<extern "C" fn(NativeHandle, u32) -> c_int>,

    // Typed property channels
    pub get_f32: Option<extern "C" fn(NativeHandle, u32) -> f32>,
    pub set_f32: Option<extern "C" fn(NativeHandle, u32, f32)>,
    pub get_bool: Option<extern "C" fn(NativeHandle, u32) -> bool>,
    pub set_bool: Option<extern "C" fn(NativeHandle, u32, bool)>,
    pub get_vec2: Option<extern "C" fn(NativeHandle, u32) -> FfiVec2>,
    pub set_vec2: Option<extern "C" fn(NativeHandle, u32, FfiVec2)>,
    pub get_vec3: Option<extern "C" fn(NativeHandle, u32) -> FfiVec3>,
    pub set_vec3: Option<extern "C" fn(NativeHandle, u32, FfiVec3)>,
    pub get_uvec2: Option<extern "C" fn(NativeHandle, u32) -> FfiUVec2>,
    pub set_uvec2: Option<extern "C" fn(NativeHandle, u32, FfiUVec2)>,
    pub get_string: Option<extern "C" fn(NativeHandle, u32, *mut c_char, usize) -> usize>,
    pub set_string: Option<extern "C" fn(NativeHandle, u32, *const c_char)>,

    // Relations
    pub get_link: Option<extern "C" fn(NativeHandle, u32, i32) -> NativeHandle>,
    pub set_link: Option<extern "C" fn(NativeHandle, u32, i32, NativeHandle)>,

    // Text slots
    pub text_slot: Option<extern "C" fn(NativeHandle, *const c_char) -> NativeHandle>,
    pub text_remove_slot: Option<extern "C" fn(NativeHandle, *const c_char) -> bool>,

    // Scenes
    pub scene_open: Option<extern "C" fn(*const c_char) -> NativeHandle>,
    pub scene_close: Option<extern "C" fn(NativeHandle)>,
    pub scene_spawn: Option<extern "C" fn(NativeHandle, u32) -> NativeHandle>,

    // Engine state
    /// Region address; the published byte length is written through the second argument
    pub state_region: Option<extern "C" fn(u32, *mut usize) -> NativeHandle>,
}

impl Default for NativeApi {
    fn default() -> Self {
        Self {
            api_version: TETHER_NATIVE_API_VERSION,
            asset_manager: None,
            asset_create: None,
            asset_get: None,
            asset_exists: None,
            asset_remove: None,
            asset_rename: None,
            asset_name: None,
            asset_kind: None,
            load: None,
            upload_f32: None,
            upload_u32: None,
            audio_command: None,
            get_f32: None,
            set_f32: None,
            get_bool: None,
            set_bool: None,
            get_vec2: None,
            set_vec2: None,
            get_vec3: None,
            set_vec3: None,
            get_uvec2: None,
            set_uvec2: None,
            get_string: None,
            set_string: None,
            get_link: None,
            set_link: None,
            text_slot: None,
            text_remove_slot: None,
            scene_open: None,
            scene_close: None,
            scene_spawn: None,
            state_region: None,
        }
    }
}

/// Type alias for the exported table accessor
pub type GetNativeApiFn = extern "C" fn() -> *const NativeApi;

// ============================================================================
// Script lifecycle hooks handed to the native frame loop
// ============================================================================

/// Hook completed normally
pub const HOOK_OK: c_int = 0;
/// Hook returned an error (already logged)
pub const HOOK_ERROR: c_int = 1;
/// Hook panicked; the panic was caught before reaching native code
pub const HOOK_PANIC: c_int = 2;
/// Hook was called with a null runtime pointer
pub const HOOK_INVALID: c_int = 3;

/// Entry points the native core calls to drive scripts
#[repr(C)]
pub struct FfiScriptHooks {
    /// Opaque pointer to the scripting runtime
    pub runtime: *mut c_void,
    /// Enter the start scene and initialise scripts, once
    pub start: Option<extern "C" fn(*mut c_void) -> c_int>,
    /// Run one frame
    pub update: Option<extern "C" fn(*mut c_void) -> c_int>,
    /// Release the runtime; `runtime` is invalid afterwards
    pub destroy: Option<extern "C" fn(*mut c_void)>,
}

impl Default for FfiScriptHooks {
    fn default() -> Self {
        Self {
            runtime: std::ptr::null_mut(),
            start: None,
            update: None,
            destroy: None,
        }
    }
}
