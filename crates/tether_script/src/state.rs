//! Pull-based snapshots of native engine state

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tether_native::{NativeBoundary, NativeError, NativeHandle, StructMirror};

use crate::error::Result;

/// Typed access to one fixed-layout engine state region.
///
/// Nothing is refreshed in the background; every [`StateHook::query`] copies
/// the region once and returns an independent snapshot.
pub struct StateHook<T: StructMirror> {
    region: NativeHandle,
    boundary: Arc<dyn NativeBoundary>,
    _mirror: PhantomData<fn() -> T>,
}

impl<T: StructMirror> StateHook<T> {
    pub(crate) fn new(boundary: Arc<dyn NativeBoundary>, region: NativeHandle) -> Result<Self> {
        if region.is_null() {
            return Err(NativeError::UnreadableRegion {
                layout: T::LAYOUT,
                reason: "not published by the native core".to_string(),
            }
            .into());
        }
        Ok(Self {
            region,
            boundary,
            _mirror: PhantomData,
        })
    }

    pub fn region(&self) -> NativeHandle {
        self.region
    }

    /// Copy the region and decode it
    pub fn query(&self) -> Result<T> {
        let mut bytes = vec![0u8; T::SIZE];
        self.boundary.read_region(self.region, &mut bytes)?;
        Ok(T::from_bytes(&bytes)?)
    }
}

impl<T: StructMirror> Clone for StateHook<T> {
    fn clone(&self) -> Self {
        Self {
            region: self.region,
            boundary: self.boundary.clone(),
            _mirror: PhantomData,
        }
    }
}

impl<T: StructMirror> fmt::Debug for StateHook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateHook")
            .field("layout", &T::LAYOUT)
            .field("region", &self.region)
            .finish()
    }
}
