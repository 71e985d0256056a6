//! Application-assigned widget identifiers.
//!
//! A [`WidgetId`] is the number the application hands to a factory so it can
//! recognise the widget later (in callbacks, or through
//! [`WidgetTree::find_by_id`](crate::tree::WidgetTree::find_by_id)). It is
//! unrelated to the generational [`WidgetHandle`](crate::widget::WidgetHandle).

use crate::widget::AnyWidgetHandle;
use trellis_core::alloc::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WidgetId(u32);

impl WidgetId {
    /// Derive an ID from a string key (32-bit FNV-1a).
    pub fn new(key: &str) -> Self {
        Self(Self::hash_str(key))
    }

    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    fn hash_str(s: &str) -> u32 {
        const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
        const FNV_PRIME: u32 = 0x01000193;

        let mut hash = FNV_OFFSET_BASIS;
        for byte in s.as_bytes() {
            hash ^= *byte as u32;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WidgetId({})", self.0)
    }
}

impl From<u32> for WidgetId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<&str> for WidgetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Lookup table from application IDs to live widgets.
///
/// IDs are expected to be unique. When two widgets share one, the most
/// recently registered widget wins.
#[derive(Default)]
pub struct WidgetIdRegistry {
    id_to_handle: HashMap<WidgetId, AnyWidgetHandle>,
}

impl WidgetIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, widget_id: WidgetId, handle: AnyWidgetHandle) {
        self.id_to_handle.insert(widget_id, handle);
    }

    pub fn get(&self, widget_id: WidgetId) -> Option<AnyWidgetHandle> {
        self.id_to_handle.get(&widget_id).copied()
    }

    /// Drop the mapping if it still points at `handle`.
    pub fn unregister(&mut self, widget_id: WidgetId, handle: AnyWidgetHandle) {
        if self.id_to_handle.get(&widget_id) == Some(&handle) {
            self.id_to_handle.remove(&widget_id);
        }
    }

    pub fn len(&self) -> usize {
        self.id_to_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_handle.is_empty()
    }
}
