//! Fixed-layout mirrors of native engine state
//!
//! The native core exposes a few plain structs by raw address. Their layout
//! is agreed out of band: every field has a declared offset and width, and
//! decoding never trusts the input length.

use std::fmt::Debug;

use crate::error::{NativeError, Result};
use crate::ffi::StateRegion;

/// Bounds-checked view over the bytes of one mirrored struct
#[derive(Debug, Clone, Copy)]
pub struct MirrorReader<'a> {
    layout: &'static str,
    bytes: &'a [u8],
}

impl<'a> MirrorReader<'a> {
    /// Fails with [`NativeError::ShortBuffer`] when `bytes` is shorter than `size`
    pub fn new(layout: &'static str, bytes: &'a [u8], size: usize) -> Result<Self> {
        if bytes.len() < size {
            return Err(NativeError::ShortBuffer {
                layout,
                needed: size,
                available: bytes.len(),
            });
        }
        Ok(Self {
            layout,
            bytes: &bytes[..size],
        })
    }

    fn field<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let end = offset.checked_add(N).unwrap_or(usize::MAX);
        let slice = self.bytes.get(offset..end).ok_or(NativeError::ShortBuffer {
            layout: self.layout,
            needed: end,
            available: self.bytes.len(),
        })?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Native-endian `i32` at `offset`
    pub fn i32_at(&self, offset: usize) -> Result<i32> {
        self.field::<4>(offset).map(i32::from_ne_bytes)
    }

    /// Native-endian `u32` at `offset`
    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        self.field::<4>(offset).map(u32::from_ne_bytes)
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        self.field::<1>(offset).map(|b| b[0])
    }

    /// One-byte bool; any non-zero byte is true
    pub fn bool_at(&self, offset: usize) -> Result<bool> {
        self.u8_at(offset).map(|b| b != 0)
    }
}

/// A native struct decoded field by field from its declared layout
pub trait StructMirror: Sized + Clone + Debug {
    /// Layout name used in error messages
    const LAYOUT: &'static str;
    /// Total size in bytes, including padding
    const SIZE: usize;
    /// Region id the native core publishes this struct under
    const REGION: StateRegion;

    fn decode(reader: &MirrorReader<'_>) -> Result<Self>;

    /// Decode from at least [`Self::SIZE`] bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = MirrorReader::new(Self::LAYOUT, bytes, Self::SIZE)?;
        Self::decode(&reader)
    }
}

/// Window dimensions and flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    pub width: i32,
    pub height: i32,
    pub closed: bool,
    pub resized: bool,
}

impl WindowState {
    pub const WIDTH_OFFSET: usize = 0;
    pub const HEIGHT_OFFSET: usize = 4;
    pub const CLOSED_OFFSET: usize = 8;
    pub const RESIZED_OFFSET: usize = 9;

    /// True when the dimensions differ from an earlier snapshot
    pub fn size_changed(&self, previous: &WindowState) -> bool {
        self.width != previous.width || self.height != previous.height
    }
}

impl StructMirror for WindowState {
    const LAYOUT: &'static str = "WindowState";
    const SIZE: usize = 12;
    const REGION: StateRegion = StateRegion::Window;

    fn decode(reader: &MirrorReader<'_>) -> Result<Self> {
        Ok(Self {
            width: reader.i32_at(Self::WIDTH_OFFSET)?,
            height: reader.i32_at(Self::HEIGHT_OFFSET)?,
            closed: reader.bool_at(Self::CLOSED_OFFSET)?,
            resized: reader.bool_at(Self::RESIZED_OFFSET)?,
        })
    }
}

/// Number of key slots in [`KeyboardState`], indexed by GLFW key code
pub const KEY_COUNT: usize = 349;

/// Common key codes for [`KeyboardState::is_down`]
pub mod keys {
    pub const SPACE: usize = 32;
    pub const A: usize = 65;
    pub const D: usize = 68;
    pub const S: usize = 83;
    pub const W: usize = 87;
    pub const ESCAPE: usize = 256;
    pub const ENTER: usize = 257;
    pub const RIGHT: usize = 262;
    pub const LEFT: usize = 263;
    pub const DOWN: usize = 264;
    pub const UP: usize = 265;
}

/// Pressed flag for every key, one byte each
#[derive(Clone, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Box<[bool; KEY_COUNT]>,
}

impl KeyboardState {
    /// Out-of-range keys are reported as released
    pub fn is_down(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    pub fn pressed(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(key, down)| down.then_some(key))
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            keys: Box::new([false; KEY_COUNT]),
        }
    }
}

impl Debug for KeyboardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardState")
            .field("pressed", &self.pressed().collect::<Vec<_>>())
            .finish()
    }
}

impl StructMirror for KeyboardState {
    const LAYOUT: &'static str = "KeyboardState";
    const SIZE: usize = KEY_COUNT;
    const REGION: StateRegion = StateRegion::Keyboard;

    fn decode(reader: &MirrorReader<'_>) -> Result<Self> {
        let mut state = KeyboardState::default();
        for (key, slot) in state.keys.iter_mut().enumerate() {
            *slot = reader.bool_at(key)?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_endian = "little")]
    fn test_window_state_decode() {
        let bytes = [10, 0, 0, 0, 20, 0, 0, 0, 1, 1, 0, 0];
        let state = WindowState::from_bytes(&bytes).unwrap();

        assert_eq!(
            state,
            WindowState {
                width: 10,
                height: 20,
                closed: true,
                resized: true,
            }
        );
    }

    #[test]
    fn test_window_state_short_buffer() {
        let err = WindowState::from_bytes(&[10, 0, 0, 0, 20, 0, 0, 0, 1]).unwrap_err();
        match err {
            NativeError::ShortBuffer {
                layout,
                needed,
                available,
            } => {
                assert_eq!(layout, "WindowState");
                assert_eq!(needed, 12);
                assert_eq!(available, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bool_is_any_nonzero_byte() {
        let mut bytes = [0u8; 12];
        bytes[WindowState::CLOSED_OFFSET] = 0x7f;
        let state = WindowState::from_bytes(&bytes).unwrap();
        assert!(state.closed);
        assert!(!state.resized);
    }

    #[test]
    fn test_reader_rejects_out_of_layout_offsets() {
        let bytes = [0u8; 12];
        let reader = MirrorReader::new("WindowState", &bytes, 12).unwrap();
        assert!(reader.i32_at(8).is_ok());
        assert!(reader.i32_at(9).is_err());
        assert!(reader.u8_at(12).is_err());
        assert!(reader.u8_at(usize::MAX).is_err());
    }

    #[test]
    fn test_size_changed() {
        let a = WindowState {
            width: 800,
            height: 600,
            ..Default::default()
        };
        let b = WindowState { width: 1024, ..a };
        assert!(b.size_changed(&a));
        assert!(!a.size_changed(&a));
    }

    #[test]
    fn test_keyboard_decode() {
        let mut bytes = vec![0u8; KEY_COUNT];
        bytes[keys::SPACE] = 1;
        bytes[keys::ESCAPE] = 1;
        let state = KeyboardState::from_bytes(&bytes).unwrap();

        assert!(state.is_down(keys::SPACE));
        assert!(state.is_down(keys::ESCAPE));
        assert!(!state.is_down(keys::W));
        assert!(!state.is_down(10_000));
        assert_eq!(state.pressed().collect::<Vec<_>>(), vec![keys::SPACE, keys::ESCAPE]);
    }

    #[test]
    fn test_keyboard_short_buffer() {
        let bytes = vec![0u8; KEY_COUNT - 1];
        assert!(matches!(
            KeyboardState::from_bytes(&bytes),
            Err(NativeError::ShortBuffer { .. })
        ));
    }
}
