//! Typed, generational widget handles.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use trellis_core::alloc::sparse_set::IndexSlot;

/// Marker for handles whose widget kind has not been checked.
pub enum AnyKind {}

/// Handle to a widget instance in a [`WidgetTree`](crate::tree::WidgetTree).
///
/// `K` records the widget kind at compile time. Factories return
/// `WidgetHandle<K>` for their own kind; everything that crosses a generic
/// boundary (callbacks, parent links, lookups) uses [`AnyWidgetHandle`] and is
/// narrowed back with [`WidgetTree::downcast`](crate::tree::WidgetTree::downcast).
///
/// The handle is a slot index plus generation, so a handle to a removed widget
/// stops resolving instead of aliasing whatever reuses the slot.
pub struct WidgetHandle<K = AnyKind> {
    slot: IndexSlot,
    _kind: PhantomData<fn() -> K>,
}

/// Handle of unchecked kind.
pub type AnyWidgetHandle = WidgetHandle<AnyKind>;

impl<K> WidgetHandle<K> {
    pub(crate) fn from_slot(slot: IndexSlot) -> Self {
        Self {
            slot,
            _kind: PhantomData,
        }
    }

    pub(crate) fn slot(&self) -> IndexSlot {
        self.slot
    }

    /// Forget the kind.
    pub fn erase(self) -> AnyWidgetHandle {
        WidgetHandle::from_slot(self.slot)
    }

    pub fn generation(&self) -> u32 {
        self.slot.generation()
    }
}

impl<K> Clone for WidgetHandle<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for WidgetHandle<K> {}

impl<K> PartialEq for WidgetHandle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<K> Eq for WidgetHandle<K> {}

impl<K> Hash for WidgetHandle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slot.hash(state);
    }
}

impl<K> std::fmt::Debug for WidgetHandle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetHandle")
            .field("kind", &std::any::type_name::<K>())
            .field("index", &self.slot.index())
            .field("generation", &self.slot.generation())
            .finish()
    }
}
