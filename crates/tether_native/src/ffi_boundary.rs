//! [`NativeBoundary`] over a C ABI function table

use std::collections::HashMap;
use std::ffi::{c_char, CString};
use std::os::raw::c_int;
use std::sync::Arc;

use glam::{UVec2, Vec2, Vec3};
use parking_lot::Mutex;

use crate::boundary::NativeBoundary;
use crate::error::{NativeError, Result};
use crate::ffi::*;
use crate::handle::NativeHandle;
use crate::library::{check_version, NativeLibrary};

/// Initial buffer size for strings copied out of native memory
const STRING_PROBE_LEN: usize = 64;

/// Boundary calling straight into a [`NativeApi`] table.
///
/// Null targets are rejected before the call. Stale handles are not
/// detectable from this side and are passed through as-is. State regions
/// are the exception: only addresses the core published through
/// `state_region` are ever dereferenced, and never past their length.
pub struct FfiBoundary {
    api: *const NativeApi,
    /// Keeps the table mapped when it came from a loaded library
    library: Option<Arc<NativeLibrary>>,
    /// Published region addresses and their byte lengths
    regions: Mutex<HashMap<NativeHandle, usize>>,
}

// Safety: the table is read-only and the native core owns its own synchronization
unsafe impl Send for FfiBoundary {}
unsafe impl Sync for FfiBoundary {}

impl FfiBoundary {
    /// Boundary over a table resolved from a loaded library
    pub fn from_library(library: Arc<NativeLibrary>) -> Self {
        let api = library.api() as *const NativeApi;
        Self {
            api,
            library: Some(library),
            regions: Mutex::new(HashMap::new()),
        }
    }

    /// Boundary over a table handed over by an embedding native core.
    ///
    /// # Safety
    ///
    /// `api` must point to a valid [`NativeApi`] that outlives the boundary.
    pub unsafe fn from_raw(api: *const NativeApi) -> Result<Self> {
        if api.is_null() {
            return Err(NativeError::null_handle("FfiBoundary::from_raw"));
        }
        check_version((*api).api_version)?;
        Ok(Self {
            api,
            library: None,
            regions: Mutex::new(HashMap::new()),
        })
    }

    /// The library this boundary was built from, if any
    pub fn library(&self) -> Option<&Arc<NativeLibrary>> {
        self.library.as_ref()
    }

    fn api(&self) -> &NativeApi {
        // Safety: non-null and outlives self, see constructors
        unsafe { &*self.api }
    }
}

fn entry<F: Copy>(f: Option<F>, name: &'static str) -> Result<F> {
    f.ok_or(NativeError::MissingEntryPoint(name))
}

fn live(operation: &'static str, handle: NativeHandle) -> Result<()> {
    if handle.is_null() {
        return Err(NativeError::null_handle(operation));
    }
    Ok(())
}

fn c_string(operation: &'static str, value: &str) -> Result<CString> {
    CString::new(value).map_err(|_| NativeError::InvalidString { operation })
}

fn check_status(operation: &'static str, status: c_int) -> Result<()> {
    if status != STATUS_OK {
        return Err(NativeError::call_failed(
            operation,
            format!("native status {status}"),
        ));
    }
    Ok(())
}

/// Copy a string out with the caller-buffer protocol
fn read_string(
    operation: &'static str,
    mut call: impl FnMut(*mut c_char, usize) -> usize,
) -> Result<String> {
    let mut buf = vec![0u8; STRING_PROBE_LEN];
    let mut len = call(buf.as_mut_ptr() as *mut c_char, buf.len());
    if len > buf.len() {
        buf.resize(len, 0);
        len = call(buf.as_mut_ptr() as *mut c_char, buf.len());
        if len > buf.len() {
            return Err(NativeError::call_failed(
                operation,
                "string length changed between calls",
            ));
        }
    }
    buf.truncate(len);
    String::from_utf8(buf).map_err(|_| NativeError::InvalidString { operation })
}

impl NativeBoundary for FfiBoundary {
    fn asset_manager(&self) -> Result<NativeHandle> {
        let f = entry(self.api().asset_manager, "asset_manager")?;
        Ok(f())
    }

    fn asset_create(
        &self,
        manager: NativeHandle,
        kind: AssetKind,
        name: &str,
    ) -> Result<NativeHandle> {
        live("asset_create", manager)?;
        let f = entry(self.api().asset_create, "asset_create")?;
        let name = c_string("asset_create", name)?;
        Ok(f(manager, kind as u32, name.as_ptr()))
    }

    fn asset_get(&self, manager: NativeHandle, name: &str) -> Result<NativeHandle> {
        live("asset_get", manager)?;
        let f = entry(self.api().asset_get, "asset_get")?;
        let name = c_string("asset_get", name)?;
        Ok(f(manager, name.as_ptr()))
    }

    fn asset_exists(&self, manager: NativeHandle, name: &str) -> Result<bool> {
        live("asset_exists", manager)?;
        let f = entry(self.api().asset_exists, "asset_exists")?;
        let name = c_string("asset_exists", name)?;
        Ok(f(manager, name.as_ptr()))
    }

    fn asset_remove(&self, manager: NativeHandle, name: &str) -> Result<bool> {
        live("asset_remove", manager)?;
        let f = entry(self.api().asset_remove, "asset_remove")?;
        let name = c_string("asset_remove", name)?;
        Ok(f(manager, name.as_ptr()))
    }

    fn asset_rename(&self, manager: NativeHandle, from: &str, to: &str) -> Result<bool> {
        live("asset_rename", manager)?;
        let f = entry(self.api().asset_rename, "asset_rename")?;
        let from = c_string("asset_rename", from)?;
        let to = c_string("asset_rename", to)?;
        Ok(f(manager, from.as_ptr(), to.as_ptr()))
    }

    fn asset_name(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<String>> {
        live("asset_name", manager)?;
        live("asset_name", asset)?;
        let f = entry(self.api().asset_name, "asset_name")?;
        // An empty name means the asset is not registered with this manager
        let name = read_string("asset_name", |buf, cap| f(manager, asset, buf, cap))?;
        Ok(if name.is_empty() { None } else { Some(name) })
    }

    fn asset_kind(&self, manager: NativeHandle, asset: NativeHandle) -> Result<Option<AssetKind>> {
        live("asset_kind", manager)?;
        live("asset_kind", asset)?;
        let f = entry(self.api().asset_kind, "asset_kind")?;
        let raw = f(manager, asset);
        if raw < 0 {
            return Ok(None);
        }
        AssetKind::from_raw(raw as u32)
            .map(Some)
            .ok_or_else(|| NativeError::call_failed("asset_kind", format!("unknown kind {raw}")))
    }

    fn load(&self, target: NativeHandle, sources: &[&str]) -> Result<()> {
        live("load", target)?;
        let f = entry(self.api().load, "load")?;
        let owned = sources
            .iter()
            .map(|s| c_string("load", s))
            .collect::<Result<Vec<_>>>()?;
        let ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();
        check_status("load", f(target, ptrs.as_ptr(), ptrs.len()))
    }

    fn upload_f32(&self, target: NativeHandle, buffer: BufferKind, data: &[f32]) -> Result<()> {
        live("upload_f32", target)?;
        let f = entry(self.api().upload_f32, "upload_f32")?;
        check_status("upload_f32", f(target, buffer as u32, data.as_ptr(), data.len()))
    }

    fn upload_u32(&self, target: NativeHandle, buffer: BufferKind, data: &[u32]) -> Result<()> {
        live("upload_u32", target)?;
        let f = entry(self.api().upload_u32, "upload_u32")?;
        check_status("upload_u32", f(target, buffer as u32, data.as_ptr(), data.len()))
    }

    fn audio_command(&self, target: NativeHandle, command: AudioCommand) -> Result<()> {
        live("audio_command", target)?;
        let f = entry(self.api().audio_command, "audio_command")?;
        check_status("audio_command", f(target, command as u32))
    }

    fn get_f32(&self, target: NativeHandle, property: Property) -> Result<f32> {
        live(property.name(), target)?;
        let f = entry(self.api().get_f32, "get_f32")?;
        Ok(f(target, property as u32))
    }

    fn set_f32(&self, target: NativeHandle, property: Property, value: f32) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_f32, "set_f32")?;
        f(target, property as u32, value);
        Ok(())
    }

    fn get_bool(&self, target: NativeHandle, property: Property) -> Result<bool> {
        live(property.name(), target)?;
        let f = entry(self.api().get_bool, "get_bool")?;
        Ok(f(target, property as u32))
    }

    fn set_bool(&self, target: NativeHandle, property: Property, value: bool) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_bool, "set_bool")?;
        f(target, property as u32, value);
        Ok(())
    }

    fn get_vec2(&self, target: NativeHandle, property: Property) -> Result<Vec2> {
        live(property.name(), target)?;
        let f = entry(self.api().get_vec2, "get_vec2")?;
        Ok(f(target, property as u32).into())
    }

    fn set_vec2(&self, target: NativeHandle, property: Property, value: Vec2) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_vec2, "set_vec2")?;
        f(target, property as u32, value.into());
        Ok(())
    }

    fn get_vec3(&self, target: NativeHandle, property: Property) -> Result<Vec3> {
        live(property.name(), target)?;
        let f = entry(self.api().get_vec3, "get_vec3")?;
        Ok(f(target, property as u32).into())
    }

    fn set_vec3(&self, target: NativeHandle, property: Property, value: Vec3) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_vec3, "set_vec3")?;
        f(target, property as u32, value.into());
        Ok(())
    }

    fn get_uvec2(&self, target: NativeHandle, property: Property) -> Result<UVec2> {
        live(property.name(), target)?;
        let f = entry(self.api().get_uvec2, "get_uvec2")?;
        Ok(f(target, property as u32).into())
    }

    fn set_uvec2(&self, target: NativeHandle, property: Property, value: UVec2) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_uvec2, "set_uvec2")?;
        f(target, property as u32, value.into());
        Ok(())
    }

    fn get_string(&self, target: NativeHandle, property: Property) -> Result<String> {
        live(property.name(), target)?;
        let f = entry(self.api().get_string, "get_string")?;
        read_string(property.name(), |buf, cap| f(target, property as u32, buf, cap))
    }

    fn set_string(&self, target: NativeHandle, property: Property, value: &str) -> Result<()> {
        live(property.name(), target)?;
        let f = entry(self.api().set_string, "set_string")?;
        let value = c_string(property.name(), value)?;
        f(target, property as u32, value.as_ptr());
        Ok(())
    }

    fn get_link(&self, target: NativeHandle, link: Link, slot: i32) -> Result<NativeHandle> {
        live("get_link", target)?;
        let f = entry(self.api().get_link, "get_link")?;
        Ok(f(target, link as u32, slot))
    }

    fn set_link(
        &self,
        target: NativeHandle,
        link: Link,
        slot: i32,
        value: NativeHandle,
    ) -> Result<()> {
        live("set_link", target)?;
        let f = entry(self.api().set_link, "set_link")?;
        f(target, link as u32, slot, value);
        Ok(())
    }

    fn text_slot(&self, text: NativeHandle, name: &str) -> Result<NativeHandle> {
        live("text_slot", text)?;
        let f = entry(self.api().text_slot, "text_slot")?;
        let name = c_string("text_slot", name)?;
        Ok(f(text, name.as_ptr()))
    }

    fn text_remove_slot(&self, text: NativeHandle, name: &str) -> Result<bool> {
        live("text_remove_slot", text)?;
        let f = entry(self.api().text_remove_slot, "text_remove_slot")?;
        let name = c_string("text_remove_slot", name)?;
        Ok(f(text, name.as_ptr()))
    }

    fn scene_open(&self, name: &str) -> Result<NativeHandle> {
        let f = entry(self.api().scene_open, "scene_open")?;
        let name = c_string("scene_open", name)?;
        Ok(f(name.as_ptr()))
    }

    fn scene_close(&self, scene: NativeHandle) -> Result<()> {
        live("scene_close", scene)?;
        let f = entry(self.api().scene_close, "scene_close")?;
        f(scene);
        Ok(())
    }

    fn scene_spawn(&self, scene: NativeHandle, member: MemberKind) -> Result<NativeHandle> {
        live("scene_spawn", scene)?;
        let f = entry(self.api().scene_spawn, "scene_spawn")?;
        Ok(f(scene, member as u32))
    }

    fn state_region(&self, region: StateRegion) -> Result<NativeHandle> {
        let f = entry(self.api().state_region, "state_region")?;
        let mut len = 0usize;
        let handle = f(region as u32, &mut len);
        if !handle.is_null() {
            self.regions.lock().insert(handle, len);
        }
        Ok(handle)
    }

    fn read_region(&self, region: NativeHandle, out: &mut [u8]) -> Result<()> {
        live("read_region", region)?;
        let len = self
            .regions
            .lock()
            .get(&region)
            .copied()
            .ok_or_else(|| NativeError::UnreadableRegion {
                layout: "state region",
                reason: format!("{region:?} was not published by state_region"),
            })?;
        if len < out.len() {
            return Err(NativeError::ShortBuffer {
                layout: "state region",
                needed: out.len(),
                available: len,
            });
        }
        // Safety: `region` was published with at least `len` readable bytes
        // and the native core keeps regions alive for the process.
        unsafe {
            std::ptr::copy_nonoverlapping(
                region.as_ptr() as *const u8,
                out.as_mut_ptr(),
                out.len(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WINDOW: [u8; 12] = [64, 0, 0, 0, 32, 0, 0, 0, 0, 1, 0, 0];
    static MANAGER: u8 = 0;

    extern "C" fn test_asset_manager() -> NativeHandle {
        NativeHandle::from_ptr(&MANAGER as *const u8 as *mut _)
    }

    extern "C" fn test_asset_name(
        _manager: NativeHandle,
        _asset: NativeHandle,
        buf: *mut c_char,
        cap: usize,
    ) -> usize {
        let name = b"a_rather_long_asset_name_that_does_not_fit_in_the_first_probe_buffer";
        let n = name.len().min(cap);
        unsafe { std::ptr::copy_nonoverlapping(name.as_ptr(), buf as *mut u8, n) };
        name.len()
    }

    extern "C" fn test_state_region(region: u32, len: *mut usize) -> NativeHandle {
        if region != StateRegion::Window as u32 {
            return NativeHandle::null();
        }
        unsafe { *len = WINDOW.len() };
        NativeHandle::from_ptr(WINDOW.as_ptr() as *mut _)
    }

    extern "C" fn test_asset_kind(_manager: NativeHandle, asset: NativeHandle) -> i32 {
        match asset.addr() {
            0x10 => AssetKind::Texture as i32,
            0x20 => 42,
            _ => -1,
        }
    }

    extern "C" fn test_load(_target: NativeHandle, sources: *const *const c_char, count: usize) -> c_int {
        if sources.is_null() || count != 2 {
            return 7;
        }
        STATUS_OK
    }

    fn table() -> &'static NativeApi {
        Box::leak(Box::new(NativeApi {
            asset_manager: Some(test_asset_manager),
            asset_name: Some(test_asset_name),
            asset_kind: Some(test_asset_kind),
            state_region: Some(test_state_region),
            load: Some(test_load),
            ..NativeApi::default()
        }))
    }

    fn boundary() -> FfiBoundary {
        unsafe { FfiBoundary::from_raw(table()).unwrap() }
    }

    #[test]
    fn test_from_raw_rejects_null_and_old_tables() {
        assert!(unsafe { FfiBoundary::from_raw(std::ptr::null()) }.is_err());

        let old = Box::leak(Box::new(NativeApi {
            api_version: 0,
            ..NativeApi::default()
        }));
        assert!(matches!(
            unsafe { FfiBoundary::from_raw(old) },
            Err(NativeError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_entry_point() {
        let boundary = boundary();
        let manager = boundary.asset_manager().unwrap();
        assert!(matches!(
            boundary.asset_get(manager, "hero"),
            Err(NativeError::MissingEntryPoint("asset_get"))
        ));
    }

    #[test]
    fn test_null_target_fails_fast() {
        let boundary = boundary();
        let err = boundary
            .set_vec3(NativeHandle::null(), Property::Position, Vec3::ONE)
            .unwrap_err();
        assert!(err.is_null_handle());
    }

    #[test]
    fn test_interior_nul_rejected() {
        let boundary = boundary();
        let manager = boundary.asset_manager().unwrap();
        assert!(matches!(
            boundary.asset_remove(manager, "bad\0name"),
            Err(NativeError::InvalidString { .. })
        ));
    }

    #[test]
    fn test_string_buffer_protocol_retries_with_needed_length() {
        let boundary = boundary();
        let manager = boundary.asset_manager().unwrap();
        let name = boundary
            .asset_name(manager, NativeHandle::from_addr(0x10))
            .unwrap();
        assert_eq!(
            name.as_deref(),
            Some("a_rather_long_asset_name_that_does_not_fit_in_the_first_probe_buffer")
        );
    }

    #[test]
    fn test_load_status() {
        let boundary = boundary();
        let target = NativeHandle::from_addr(0x10);
        assert!(boundary.load(target, &["vertex", "fragment"]).is_ok());
        assert!(matches!(
            boundary.load(target, &["only_one"]),
            Err(NativeError::CallFailed { operation: "load", .. })
        ));
    }

    #[test]
    fn test_read_region_copies_bytes() {
        let boundary = boundary();
        let region = boundary.state_region(StateRegion::Window).unwrap();
        let mut out = [0u8; 12];
        boundary.read_region(region, &mut out).unwrap();
        assert_eq!(out, WINDOW);
    }

    #[test]
    fn test_unpublished_region_is_never_dereferenced() {
        let boundary = boundary();
        let mut out = [0u8; 12];
        assert!(matches!(
            boundary.read_region(NativeHandle::from_addr(0x8), &mut out),
            Err(NativeError::UnreadableRegion { .. })
        ));

        // Keyboard is not published by this table
        assert!(boundary.state_region(StateRegion::Keyboard).unwrap().is_null());
        assert!(matches!(
            boundary.read_region(NativeHandle::from_ptr(WINDOW.as_ptr() as *mut _), &mut out),
            Err(NativeError::UnreadableRegion { .. })
        ));
    }

    #[test]
    fn test_read_past_published_length() {
        let boundary = boundary();
        let region = boundary.state_region(StateRegion::Window).unwrap();
        let mut out = [0u8; 16];
        assert!(matches!(
            boundary.read_region(region, &mut out),
            Err(NativeError::ShortBuffer {
                needed: 16,
                available: 12,
                ..
            })
        ));
    }

    #[test]
    fn test_asset_kind_decoding() {
        let boundary = boundary();
        let manager = boundary.asset_manager().unwrap();
        assert_eq!(
            boundary
                .asset_kind(manager, NativeHandle::from_addr(0x10))
                .unwrap(),
            Some(AssetKind::Texture)
        );
        assert_eq!(
            boundary
                .asset_kind(manager, NativeHandle::from_addr(0x30))
                .unwrap(),
            None
        );
        assert!(matches!(
            boundary.asset_kind(manager, NativeHandle::from_addr(0x20)),
            Err(NativeError::CallFailed { operation: "asset_kind", .. })
        ));
    }
}
