//! Widget kind descriptors and the registry that maps kinds to them.
//!
//! Every widget kind owns one `'static` [`WidgetDescriptor`]. Instances keep a
//! reference to it, and the tree compares descriptor addresses to decide
//! whether a handle belongs to a given kind.

use crate::error::WidgetResult;
use crate::event::WidgetEvent;
use crate::tree::WidgetTree;
use crate::widget::AnyWidgetHandle;
use bitflags::bitflags;
use indexmap::IndexMap;
use std::any::TypeId;
use trellis_core::alloc::HashMap;
use trellis_core::color::Color;

/// Event handler shared by every instance of a kind.
///
/// Returns `Ok(true)` when the event was handled, `Ok(false)` to let the tree
/// apply its default behavior.
pub type WidgetCallback =
    fn(&mut WidgetTree, AnyWidgetHandle, &mut WidgetEvent<'_>) -> WidgetResult<bool>;

bitflags! {
    /// Capabilities of a widget kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindFlags: u8 {
        /// Instances may own child widgets.
        const ALLOW_CHILDREN = 1 << 0;
    }
}

/// Immutable description of a widget kind.
pub struct WidgetDescriptor {
    /// Kind name, e.g. `"CONTAINER"`.
    pub name: &'static str,
    /// Bytes charged against the tree's memory budget per instance.
    pub size: usize,
    pub flags: KindFlags,
    /// Default event handler.
    pub callback: WidgetCallback,
    /// Default color table, indexed by the kind's color enum.
    pub colors: &'static [Color],
}

impl std::fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDescriptor")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("flags", &self.flags)
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

impl WidgetDescriptor {
    pub fn allows_children(&self) -> bool {
        self.flags.contains(KindFlags::ALLOW_CHILDREN)
    }

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }
}

/// A widget kind: a type tag bound to its descriptor.
///
/// Kinds are usually uninhabited or unit types; instance data lives in the
/// tree's node storage.
pub trait WidgetKind: 'static {
    fn descriptor() -> &'static WidgetDescriptor;
}

/// Registry mapping kind `TypeId` → descriptor.
///
/// Iteration follows registration order.
pub struct WidgetKindRegistry {
    descriptors: IndexMap<TypeId, &'static WidgetDescriptor>,
    by_name: HashMap<&'static str, TypeId>,
}

impl WidgetKindRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
            by_name: HashMap::default(),
        }
    }

    /// Register kind `K`. Returns `false` if it was already registered.
    pub fn register<K: WidgetKind>(&mut self) -> bool {
        let descriptor = K::descriptor();
        let type_id = TypeId::of::<K>();
        if self.descriptors.contains_key(&type_id) {
            return false;
        }
        if let Some(previous) = self.by_name.insert(descriptor.name, type_id) {
            tracing::warn!(
                "Widget kind name '{}' now refers to {:?} (was {:?})",
                descriptor.name,
                type_id,
                previous
            );
        }
        self.descriptors.insert(type_id, descriptor);
        true
    }

    pub fn get(&self, type_id: TypeId) -> Option<&'static WidgetDescriptor> {
        self.descriptors.get(&type_id).copied()
    }

    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains_key(&type_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&'static WidgetDescriptor> {
        self.by_name.get(name).and_then(|type_id| self.get(*type_id))
    }

    /// Kind names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.values().map(|descriptor| descriptor.name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for WidgetKindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
