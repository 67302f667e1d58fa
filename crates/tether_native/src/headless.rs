//! Headless native core
//!
//! An in-process implementation of the whole native contract with no
//! renderer, audio device or window behind it. Objects live in a table keyed
//! by synthetic addresses that are never reused, which lets this core detect
//! stale handles that a real native core would silently accept.

use std::collections::HashMap;

use glam::{UVec2, Vec2, Vec3};
use parking_lot::Mutex;

use crate::boundary::NativeBoundary;
use crate::error::{NativeError, Result};
use crate::ffi::{
    AssetKind, AudioCommand, BufferKind, Link, MemberKind, Property, StateRegion, ValueType,
};
use crate::handle::NativeHandle;
use crate::mirror::{StructMirror, WindowState, KEY_COUNT};

const FIRST_ADDR: usize = 0x1000;
const ADDR_STRIDE: usize = 0x10;

/// What a headless object is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    AssetManager,
    Asset(AssetKind),
    Scene,
    GameObject,
    Camera,
    TextSlot,
    StateRegion(StateRegion),
}

/// Audio transport state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    F32(f32),
    Bool(bool),
    Vec2(Vec2),
    Vec3(Vec3),
    UVec2(UVec2),
    String(String),
}

impl Value {
    fn default_for(property: Property) -> Self {
        match property {
            Property::Scale => Value::Vec3(Vec3::ONE),
            Property::AtlasSize => Value::UVec2(UVec2::ONE),
            Property::Pitch | Property::Volume => Value::F32(1.0),
            Property::ListenerVolume => Value::F32(0.5),
            Property::ListenerAt => Value::Vec3(Vec3::new(0.0, 0.0, -1.0)),
            Property::ListenerUp => Value::Vec3(Vec3::Y),
            Property::SlotVisible => Value::Bool(true),
            other => match other.value_type() {
                ValueType::F32 => Value::F32(0.0),
                ValueType::Bool => Value::Bool(false),
                ValueType::Vec2 => Value::Vec2(Vec2::ZERO),
                ValueType::Vec3 => Value::Vec3(Vec3::ZERO),
                ValueType::UVec2 => Value::UVec2(UVec2::ZERO),
                ValueType::String => Value::String(String::new()),
            },
        }
    }
}

#[derive(Debug)]
struct Object {
    kind: ObjectKind,
    /// Scene for members, Text for slots
    owner: Option<NativeHandle>,
    name: String,
    values: HashMap<Property, Value>,
    links: HashMap<(Link, i32), NativeHandle>,
    sources: Vec<String>,
    loads: u32,
    floats: HashMap<BufferKind, Vec<f32>>,
    indices: Vec<u32>,
    playback: Playback,
    slots: HashMap<String, NativeHandle>,
    bytes: Vec<u8>,
}

impl Object {
    fn new(kind: ObjectKind, owner: Option<NativeHandle>, name: impl Into<String>) -> Self {
        Self {
            kind,
            owner,
            name: name.into(),
            values: HashMap::new(),
            links: HashMap::new(),
            sources: Vec::new(),
            loads: 0,
            floats: HashMap::new(),
            indices: Vec::new(),
            playback: Playback::Stopped,
            slots: HashMap::new(),
            bytes: Vec::new(),
        }
    }
}

fn supports(kind: ObjectKind, property: Property) -> bool {
    use Property::*;
    match kind {
        ObjectKind::GameObject => matches!(property, Position | Rotation | Scale | AtlasOffset),
        ObjectKind::Camera => matches!(property, Position | Rotation),
        ObjectKind::Asset(AssetKind::Audio) => {
            matches!(property, Position | Pitch | Volume | Velocity | Looping)
        }
        ObjectKind::Asset(AssetKind::Visual) => matches!(property, AtlasSize),
        ObjectKind::TextSlot => matches!(property, SlotPosition | SlotContent | SlotVisible),
        ObjectKind::Scene => matches!(
            property,
            ListenerPosition | ListenerVolume | ListenerAt | ListenerUp
        ),
        _ => false,
    }
}

/// Kind a link on `kind` must point at
fn link_target(kind: ObjectKind, link: Link) -> Option<ObjectKind> {
    match (kind, link) {
        (ObjectKind::Asset(AssetKind::Visual), Link::Mesh) => {
            Some(ObjectKind::Asset(AssetKind::MeshBuffer))
        }
        (ObjectKind::Asset(AssetKind::Visual), Link::Shader)
        | (ObjectKind::Asset(AssetKind::Text), Link::Shader) => {
            Some(ObjectKind::Asset(AssetKind::Shader))
        }
        (ObjectKind::Asset(AssetKind::Visual), Link::Texture) => {
            Some(ObjectKind::Asset(AssetKind::Texture))
        }
        (ObjectKind::GameObject, Link::Visual) => Some(ObjectKind::Asset(AssetKind::Visual)),
        (ObjectKind::Scene, Link::ActiveCamera) => Some(ObjectKind::Camera),
        _ => None,
    }
}

fn expected_sources(kind: AssetKind) -> Option<usize> {
    match kind {
        AssetKind::Shader => Some(2),
        AssetKind::Texture | AssetKind::Audio | AssetKind::Text => Some(1),
        AssetKind::Visual | AssetKind::MeshBuffer => None,
    }
}

struct CoreState {
    next_addr: usize,
    manager: NativeHandle,
    assets: HashMap<String, NativeHandle>,
    objects: HashMap<NativeHandle, Object>,
    regions: HashMap<StateRegion, NativeHandle>,
}

impl CoreState {
    fn alloc(&mut self, object: Object) -> NativeHandle {
        let handle = NativeHandle::from_addr(self.next_addr);
        self.next_addr += ADDR_STRIDE;
        self.objects.insert(handle, object);
        handle
    }

    fn object(&self, operation: &'static str, handle: NativeHandle) -> Result<&Object> {
        if handle.is_null() {
            return Err(NativeError::null_handle(operation));
        }
        self.objects
            .get(&handle)
            .ok_or(NativeError::unknown_handle(operation, handle))
    }

    fn object_mut(&mut self, operation: &'static str, handle: NativeHandle) -> Result<&mut Object> {
        if handle.is_null() {
            return Err(NativeError::null_handle(operation));
        }
        self.objects
            .get_mut(&handle)
            .ok_or(NativeError::unknown_handle(operation, handle))
    }

    fn check_manager(&self, operation: &'static str, manager: NativeHandle) -> Result<()> {
        let object = self.object(operation, manager)?;
        if object.kind != ObjectKind::AssetManager {
            return Err(NativeError::invalid_argument(operation, "not an asset manager"));
        }
        Ok(())
    }

    fn asset_mut(
        &mut self,
        operation: &'static str,
        handle: NativeHandle,
        kind: AssetKind,
    ) -> Result<&mut Object> {
        let object = self.object_mut(operation, handle)?;
        if object.kind != ObjectKind::Asset(kind) {
            return Err(NativeError::invalid_argument(
                operation,
                format!("expected {kind}, found {:?}", object.kind),
            ));
        }
        Ok(object)
    }

    fn value(&self, handle: NativeHandle, property: Property) -> Result<Value> {
        let object = self.object(property.name(), handle)?;
        if !supports(object.kind, property) {
            return Err(NativeError::invalid_argument(
                property.name(),
                format!("not a property of {:?}", object.kind),
            ));
        }
        Ok(object
            .values
            .get(&property)
            .cloned()
            .unwrap_or_else(|| Value::default_for(property)))
    }

    fn set_value(&mut self, handle: NativeHandle, property: Property, value: Value) -> Result<()> {
        let object = self.object_mut(property.name(), handle)?;
        if !supports(object.kind, property) {
            return Err(NativeError::invalid_argument(
                property.name(),
                format!("not a property of {:?}", object.kind),
            ));
        }
        object.values.insert(property, value);
        Ok(())
    }

    /// Drop an object and everything owned by it
    fn destroy(&mut self, handle: NativeHandle) {
        let owned: Vec<NativeHandle> = self
            .objects
            .iter()
            .filter(|(_, o)| o.owner == Some(handle))
            .map(|(h, _)| *h)
            .collect();
        self.objects.remove(&handle);
        for child in owned {
            self.destroy(child);
        }
        for object in self.objects.values_mut() {
            object.links.retain(|_, target| *target != handle);
        }
    }

    fn region_bytes_mut(&mut self, region: StateRegion) -> Option<&mut Vec<u8>> {
        let handle = *self.regions.get(&region)?;
        self.objects.get_mut(&handle).map(|o| &mut o.bytes)
    }
}

fn wrong_type(property: Property) -> NativeError {
    NativeError::invalid_argument(
        property.name(),
        format!("travels on the {:?} channel", property.value_type()),
    )
}

/// In-process native core for tests and window-less hosts
pub struct HeadlessCore {
    state: Mutex<CoreState>,
}

impl HeadlessCore {
    /// Create a core with one asset manager and default engine state
    pub fn new() -> Self {
        let mut state = CoreState {
            next_addr: FIRST_ADDR,
            manager: NativeHandle::null(),
            assets: HashMap::new(),
            objects: HashMap::new(),
            regions: HashMap::new(),
        };
        state.manager = state.alloc(Object::new(ObjectKind::AssetManager, None, "assets"));

        for region in StateRegion::ALL {
            let mut object = Object::new(ObjectKind::StateRegion(region), None, "");
            object.bytes = match region {
                StateRegion::Window => vec![0u8; WindowState::SIZE],
                StateRegion::Keyboard => vec![0u8; KEY_COUNT],
            };
            let handle = state.alloc(object);
            state.regions.insert(region, handle);
        }

        let core = Self {
            state: Mutex::new(state),
        };
        core.set_window_state(WindowState {
            width: 1280,
            height: 720,
            closed: false,
            resized: false,
        });
        log::debug!("Headless native core ready");
        core
    }

    /// Publish new window state
    pub fn set_window_state(&self, window: WindowState) {
        let mut state = self.state.lock();
        if let Some(bytes) = state.region_bytes_mut(StateRegion::Window) {
            let mut raw = [0u8; WindowState::SIZE];
            raw[WindowState::WIDTH_OFFSET..WindowState::WIDTH_OFFSET + 4]
                .copy_from_slice(&window.width.to_ne_bytes());
            raw[WindowState::HEIGHT_OFFSET..WindowState::HEIGHT_OFFSET + 4]
                .copy_from_slice(&window.height.to_ne_bytes());
            raw[WindowState::CLOSED_OFFSET] = window.closed as u8;
            raw[WindowState::RESIZED_OFFSET] = window.resized as u8;
            let len = bytes.len().min(raw.len());
            bytes[..len].copy_from_slice(&raw[..len]);
        }
    }

    /// Press or release a key
    pub fn set_key(&self, key: usize, down: bool) {
        let mut state = self.state.lock();
        if let Some(slot) = state
            .region_bytes_mut(StateRegion::Keyboard)
            .and_then(|bytes| bytes.get_mut(key))
        {
            *slot = down as u8;
        }
    }

    /// Shrink a published region, emulating a native struct smaller than its mirror
    pub fn truncate_region(&self, region: StateRegion, len: usize) {
        let mut state = self.state.lock();
        if let Some(bytes) = state.region_bytes_mut(region) {
            bytes.truncate(len);
        }
    }

    /// Stop publishing a region; `state_region` returns null afterwards
    pub fn withdraw_region(&self, region: StateRegion) {
        let mut state = self.state.lock();
        if let Some(handle) = state.regions.remove(&region) {
            state.objects.remove(&handle);
        }
    }

    pub fn is_alive(&self, handle: NativeHandle) -> bool {
        self.state.lock().objects.contains_key(&handle)
    }

    pub fn kind_of(&self, handle: NativeHandle) -> Option<ObjectKind> {
        self.state.lock().objects.get(&handle).map(|o| o.kind)
    }

    /// Number of live native assets of one kind
    pub fn asset_count(&self, kind: AssetKind) -> usize {
        self.state
            .lock()
            .objects
            .values()
            .filter(|o| o.kind == ObjectKind::Asset(kind))
            .count()
    }

    /// Number of scenes currently open
    pub fn scene_count(&self) -> usize {
        self.state
            .lock()
            .objects
            .values()
            .filter(|o| o.kind == ObjectKind::Scene)
            .count()
    }

    /// Sources passed to the most recent `load`
    pub fn sources(&self, handle: NativeHandle) -> Option<Vec<String>> {
        self.state.lock().objects.get(&handle).map(|o| o.sources.clone())
    }

    pub fn load_count(&self, handle: NativeHandle) -> u32 {
        self.state
            .lock()
            .objects
            .get(&handle)
            .map(|o| o.loads)
            .unwrap_or(0)
    }

    pub fn float_buffer(&self, handle: NativeHandle, buffer: BufferKind) -> Option<Vec<f32>> {
        self.state
            .lock()
            .objects
            .get(&handle)
            .and_then(|o| o.floats.get(&buffer).cloned())
    }

    pub fn indices(&self, handle: NativeHandle) -> Option<Vec<u32>> {
        self.state.lock().objects.get(&handle).map(|o| o.indices.clone())
    }

    pub fn playback(&self, handle: NativeHandle) -> Option<Playback> {
        self.state.lock().objects.get(&handle).map(|o| o.playback)
    }
}

impl Default for HeadlessCore {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeBoundary for HeadlessCore {
    fn asset_manager(&self) -> Result<NativeHandle> {
        Ok(self.state.lock().manager)
    }

    fn asset_create(
        &self,
        manager: NativeHandle,
        kind: AssetKind,
        name: &str,
    ) -> Result<NativeHandle> {
        let mut state = self.state.lock();
        state.check_manager("asset_create", manager)?;
        if state.assets.contains_key(name) {
            return Ok(NativeHandle::null());
        }
        let handle = state.alloc(Object::new(ObjectKind::Asset(kind), None, name));
        state.assets.insert(name.to_string(), handle);
        log::trace!("headless: created {kind} '{name}' at {handle:?}");
        Ok(handle)
    }

    fn asset_get(&self, manager: NativeHandle, name: &str) -> Result<NativeHandle> {
        let state = self.state.lock();
        state.check_manager("asset_get", manager)?;
        Ok(state.assets.get(name).copied().unwrap_or_default())
    }

    fn asset_exists(&self, manager: NativeHandle, name: &str) -> Result<bool> {
        let state = self.state.lock();
        state.check_manager("asset_exists", manager)?;
        Ok(state.assets.contains_key(name))
    }

    fn asset_remove(&self, manager: NativeHandle, name: &str) -> Result<bool> {
        let mut state = self.state.lock();
        state.check_manager("asset_remove", manager)?;
        match state.assets.remove(name) {
            Some(handle) => {
                state.destroy(handle);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn asset_rename(&self, manager: NativeHandle, from: &str, to: &str) -> Result<bool> {
        let mut state = self.state.lock();
        state.check_manager("asset_rename", manager)?;
        if state.assets.contains_key(to) {
            return Ok(false);
        }
        let Some(handle) = state.assets.remove(from) else {
            return Ok(false);
        };
        state.assets.insert(to.to_string(), handle);
        if let Some(object) = state.objects.get_mut(&handle) {
            object.name = to.to_string();
        }
        Ok(true)
    }

    fn asset_name(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<String>> {
        let state = self.state.lock();
        state.check_manager("asset_name", manager)?;
        let object = state.object("asset_name", asset)?;
        Ok(match object.kind {
            ObjectKind::Asset(_) => Some(object.name.clone()),
            _ => None,
        })
    }

    fn asset_kind(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<AssetKind>> {
        let state = self.state.lock();
        state.check_manager("asset_kind", manager)?;
        Ok(match state.object("asset_kind", asset)?.kind {
            ObjectKind::Asset(kind) => Some(kind),
            _ => None,
        })
    }

    fn load(&self, target: NativeHandle, sources: &[&str]) -> Result<()> {
        let mut state = self.state.lock();
        let object = state.object_mut("load", target)?;
        let ObjectKind::Asset(kind) = object.kind else {
            return Err(NativeError::invalid_argument("load", "target is not an asset"));
        };
        let expected = expected_sources(kind)
            .ok_or_else(|| NativeError::invalid_argument("load", format!("{kind} has no sources")))?;
        if sources.len() != expected {
            return Err(NativeError::invalid_argument(
                "load",
                format!("{kind} takes {expected} source(s), got {}", sources.len()),
            ));
        }
        if sources.iter().any(|s| s.is_empty()) {
            return Err(NativeError::call_failed("load", "empty source"));
        }
        object.sources = sources.iter().map(|s| s.to_string()).collect();
        object.loads += 1;
        Ok(())
    }

    fn upload_f32(&self, target: NativeHandle, buffer: BufferKind, data: &[f32]) -> Result<()> {
        let mut state = self.state.lock();
        let object = state.asset_mut("upload_f32", target, AssetKind::MeshBuffer)?;
        if buffer == BufferKind::Indices {
            return Err(NativeError::invalid_argument("upload_f32", "indices are u32"));
        }
        object.floats.insert(buffer, data.to_vec());
        Ok(())
    }

    fn upload_u32(&self, target: NativeHandle, buffer: BufferKind, data: &[u32]) -> Result<()> {
        let mut state = self.state.lock();
        let object = state.asset_mut("upload_u32", target, AssetKind::MeshBuffer)?;
        if buffer != BufferKind::Indices {
            return Err(NativeError::invalid_argument("upload_u32", "only indices are u32"));
        }
        object.indices = data.to_vec();
        Ok(())
    }

    fn audio_command(&self, target: NativeHandle, command: AudioCommand) -> Result<()> {
        let mut state = self.state.lock();
        let object = state.asset_mut("audio_command", target, AssetKind::Audio)?;
        object.playback = match (command, object.playback) {
            (AudioCommand::Play, _) => Playback::Playing,
            (AudioCommand::Pause, Playback::Playing) => Playback::Paused,
            (AudioCommand::Pause, current) => current,
            (AudioCommand::Stop, _) => Playback::Stopped,
        };
        Ok(())
    }

    fn get_f32(&self, target: NativeHandle, property: Property) -> Result<f32> {
        match self.state.lock().value(target, property)? {
            Value::F32(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_f32(&self, target: NativeHandle, property: Property, value: f32) -> Result<()> {
        if property.value_type() != ValueType::F32 {
            return Err(wrong_type(property));
        }
        self.state.lock().set_value(target, property, Value::F32(value))
    }

    fn get_bool(&self, target: NativeHandle, property: Property) -> Result<bool> {
        match self.state.lock().value(target, property)? {
            Value::Bool(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_bool(&self, target: NativeHandle, property: Property, value: bool) -> Result<()> {
        if property.value_type() != ValueType::Bool {
            return Err(wrong_type(property));
        }
        self.state.lock().set_value(target, property, Value::Bool(value))
    }

    fn get_vec2(&self, target: NativeHandle, property: Property) -> Result<Vec2> {
        match self.state.lock().value(target, property)? {
            Value::Vec2(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_vec2(&self, target: NativeHandle, property: Property, value: Vec2) -> Result<()> {
        if property.value_type() != ValueType::Vec2 {
            return Err(wrong_type(property));
        }
        self.state.lock().set_value(target, property, Value::Vec2(value))
    }

    fn get_vec3(&self, target: NativeHandle, property: Property) -> Result<Vec3> {
        match self.state.lock().value(target, property)? {
            Value::Vec3(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_vec3(&self, target: NativeHandle, property: Property, value: Vec3) -> Result<()> {
        if property.value_type() != ValueType::Vec3 {
            return Err(wrong_type(property));
        }
        self.state.lock().set_value(target, property, Value::Vec3(value))
    }

    fn get_uvec2(&self, target: NativeHandle, property: Property) -> Result<UVec2> {
        match self.state.lock().value(target, property)? {
            Value::UVec2(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_uvec2(&self, target: NativeHandle, property: Property, value: UVec2) -> Result<()> {
        if property.value_type() != ValueType::UVec2 {
            return Err(wrong_type(property));
        }
        self.state.lock().set_value(target, property, Value::UVec2(value))
    }

    fn get_string(&self, target: NativeHandle, property: Property) -> Result<String> {
        match self.state.lock().value(target, property)? {
            Value::String(v) => Ok(v),
            _ => Err(wrong_type(property)),
        }
    }

    fn set_string(&self, target: NativeHandle, property: Property, value: &str) -> Result<()> {
        if property.value_type() != ValueType::String {
            return Err(wrong_type(property));
        }
        self.state
            .lock()
            .set_value(target, property, Value::String(value.to_string()))
    }

    fn get_link(&self, target: NativeHandle, link: Link, slot: i32) -> Result<NativeHandle> {
        let state = self.state.lock();
        let object = state.object("get_link", target)?;
        if link_target(object.kind, link).is_none() {
            return Err(NativeError::invalid_argument(
                "get_link",
                format!("{link:?} is not a relation of {:?}", object.kind),
            ));
        }
        let slot = if link == Link::Texture { slot } else { 0 };
        Ok(object.links.get(&(link, slot)).copied().unwrap_or_default())
    }

    fn set_link(
        &self,
        target: NativeHandle,
        link: Link,
        slot: i32,
        value: NativeHandle,
    ) -> Result<()> {
        let mut state = self.state.lock();
        let kind = state.object("set_link", target)?.kind;
        let expected = link_target(kind, link).ok_or_else(|| {
            NativeError::invalid_argument(
                "set_link",
                format!("{link:?} is not a relation of {kind:?}"),
            )
        })?;
        if link == Link::Texture && slot < 0 {
            return Err(NativeError::invalid_argument("set_link", "negative texture slot"));
        }
        if !value.is_null() {
            let linked = state.object("set_link", value)?;
            if linked.kind != expected {
                return Err(NativeError::invalid_argument(
                    "set_link",
                    format!("{link:?} expects {expected:?}, got {:?}", linked.kind),
                ));
            }
            if link == Link::ActiveCamera && linked.owner != Some(target) {
                return Err(NativeError::invalid_argument(
                    "set_link",
                    "camera belongs to another scene",
                ));
            }
        }
        let slot = if link == Link::Texture { slot } else { 0 };
        let object = state.object_mut("set_link", target)?;
        if value.is_null() {
            object.links.remove(&(link, slot));
        } else {
            object.links.insert((link, slot), value);
        }
        Ok(())
    }

    fn text_slot(&self, text: NativeHandle, name: &str) -> Result<NativeHandle> {
        let mut state = self.state.lock();
        let object = state.asset_mut("text_slot", text, AssetKind::Text)?;
        if let Some(slot) = object.slots.get(name) {
            return Ok(*slot);
        }
        let slot = state.alloc(Object::new(ObjectKind::TextSlot, Some(text), name));
        state
            .object_mut("text_slot", text)?
            .slots
            .insert(name.to_string(), slot);
        Ok(slot)
    }

    fn text_remove_slot(&self, text: NativeHandle, name: &str) -> Result<bool> {
        let mut state = self.state.lock();
        let object = state.asset_mut("text_remove_slot", text, AssetKind::Text)?;
        match object.slots.remove(name) {
            Some(slot) => {
                state.destroy(slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn scene_open(&self, name: &str) -> Result<NativeHandle> {
        let mut state = self.state.lock();
        let handle = state.alloc(Object::new(ObjectKind::Scene, None, name));
        log::trace!("headless: opened scene '{name}' at {handle:?}");
        Ok(handle)
    }

    fn scene_close(&self, scene: NativeHandle) -> Result<()> {
        let mut state = self.state.lock();
        if state.object("scene_close", scene)?.kind != ObjectKind::Scene {
            return Err(NativeError::invalid_argument("scene_close", "not a scene"));
        }
        state.destroy(scene);
        Ok(())
    }

    fn scene_spawn(&self, scene: NativeHandle, member: MemberKind) -> Result<NativeHandle> {
        let mut state = self.state.lock();
        if state.object("scene_spawn", scene)?.kind != ObjectKind::Scene {
            return Err(NativeError::invalid_argument("scene_spawn", "not a scene"));
        }
        let kind = match member {
            MemberKind::GameObject => ObjectKind::GameObject,
            MemberKind::Camera => ObjectKind::Camera,
        };
        Ok(state.alloc(Object::new(kind, Some(scene), "")))
    }

    fn state_region(&self, region: StateRegion) -> Result<NativeHandle> {
        Ok(self
            .state
            .lock()
            .regions
            .get(&region)
            .copied()
            .unwrap_or_default())
    }

    fn read_region(&self, region: NativeHandle, out: &mut [u8]) -> Result<()> {
        if region.is_null() {
            return Err(NativeError::null_handle("read_region"));
        }
        let state = self.state.lock();
        let object = state
            .objects
            .get(&region)
            .filter(|o| matches!(o.kind, ObjectKind::StateRegion(_)))
            .ok_or_else(|| NativeError::UnreadableRegion {
                layout: "state region",
                reason: format!("{region:?} is not a published region"),
            })?;
        if object.bytes.len() < out.len() {
            return Err(NativeError::ShortBuffer {
                layout: "state region",
                needed: out.len(),
                available: object.bytes.len(),
            });
        }
        out.copy_from_slice(&object.bytes[..out.len()]);
        Ok(())
    }
}
