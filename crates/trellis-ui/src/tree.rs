//! Widget tree: allocation, geometry, colors and event dispatch for every
//! widget kind.
//!
//! Kind modules never touch node storage directly. Their factories call
//! [`WidgetTree::create`] and their callbacks read state back through the
//! accessors here.

use crate::config::UiConfig;
use crate::dirty::DirtyFlags;
use crate::error::{WidgetError, WidgetResult};
use crate::event::WidgetEvent;
use crate::plugin::{
    CorePlugin, WidgetCallback, WidgetDescriptor, WidgetKind, WidgetKindRegistry, WidgetPlugin,
};
use crate::widget::{AnyWidgetHandle, WidgetHandle};
use crate::widget_id::{WidgetId, WidgetIdRegistry};
use crate::widgets::Desktop;
use bitflags::bitflags;
use std::any::TypeId;
use trellis_core::alloc::sparse_set::SparseSet;
use trellis_core::color::Color;
use trellis_core::display::Display;
use trellis_core::geometry::Rect;
use trellis_core::math::Vec2;
use trellis_core::profiling::{self, profile_function, profile_scope};

bitflags! {
    /// Flags applied when a widget is created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CreateFlags: u16 {
        /// Start hidden; the widget and its subtree are skipped when rendering.
        const HIDDEN = 1 << 0;
    }
}

/// Arguments to [`WidgetTree::create`].
#[derive(Clone, Copy)]
pub struct CreateParams {
    pub id: WidgetId,
    /// Position relative to the parent, and size.
    pub rect: Rect<f32>,
    /// `None` uses the tree's active parent.
    pub parent: Option<AnyWidgetHandle>,
    /// `None` uses the kind's own callback.
    pub callback: Option<WidgetCallback>,
    pub flags: CreateFlags,
}

impl CreateParams {
    pub fn new(id: impl Into<WidgetId>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            rect: Rect::new(x, y, width, height),
            parent: None,
            callback: None,
            flags: CreateFlags::empty(),
        }
    }

    pub fn with_parent(mut self, parent: AnyWidgetHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_callback(mut self, callback: WidgetCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn with_flags(mut self, flags: CreateFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A widget instance.
pub struct WidgetNode {
    descriptor: &'static WidgetDescriptor,
    id: WidgetId,
    callback: WidgetCallback,
    parent: Option<AnyWidgetHandle>,
    children: Vec<AnyWidgetHandle>,
    position: Vec2,
    size: Vec2,
    hidden: bool,
    /// Per-instance color overrides, allocated on first write.
    colors: Option<Box<[Color]>>,
    dirty: DirtyFlags,
}

impl WidgetNode {
    pub fn descriptor(&self) -> &'static WidgetDescriptor {
        self.descriptor
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Callback invoked by [`WidgetTree::dispatch`].
    pub fn callback(&self) -> WidgetCallback {
        self.callback
    }

    pub fn parent(&self) -> Option<AnyWidgetHandle> {
        self.parent
    }

    /// Children in paint order (first child is painted first).
    pub fn children(&self) -> &[AnyWidgetHandle] {
        &self.children
    }

    /// Position relative to the parent.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn has_color_overrides(&self) -> bool {
        self.colors.is_some()
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Bytes this node holds against the memory budget.
    fn memory_cost(&self) -> usize {
        self.descriptor.size + self.colors.as_ref().map_or(0, |c| color_table_bytes(c.len()))
    }
}

fn color_table_bytes(count: usize) -> usize {
    count * std::mem::size_of::<Color>()
}

/// Owner of all widget instances.
///
/// The tree starts with a single [`Desktop`] root sized to the configured
/// screen; it is the default parent for new widgets until
/// [`set_active_parent`](Self::set_active_parent) picks another one.
pub struct WidgetTree {
    nodes: SparseSet<WidgetNode>,
    registry: WidgetKindRegistry,
    plugins: Vec<(TypeId, Box<dyn WidgetPlugin>)>,
    ids: WidgetIdRegistry,
    desktop: AnyWidgetHandle,
    active_parent: AnyWidgetHandle,
    config: UiConfig,
    /// Bytes in use by widgets other than the desktop.
    memory_used: usize,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        let mut registry = WidgetKindRegistry::new();
        CorePlugin.register_kinds(&mut registry);

        let descriptor = Desktop::descriptor();
        let mut nodes = SparseSet::new();
        let slot = nodes.push(WidgetNode {
            descriptor,
            id: WidgetId::default(),
            callback: descriptor.callback,
            parent: None,
            children: Vec::new(),
            position: Vec2::ZERO,
            size: Vec2::new(config.screen_size.width, config.screen_size.height),
            hidden: false,
            colors: None,
            dirty: DirtyFlags::LAYOUT,
        });
        let desktop = AnyWidgetHandle::from_slot(slot);

        tracing::debug!(
            "Widget tree created ({}x{}, {} byte budget)",
            config.screen_size.width,
            config.screen_size.height,
            config.memory_budget
        );

        let core: Box<dyn WidgetPlugin> = Box::new(CorePlugin);
        Self {
            nodes,
            registry,
            plugins: vec![(TypeId::of::<CorePlugin>(), core)],
            ids: WidgetIdRegistry::new(),
            desktop,
            active_parent: desktop,
            config,
            memory_used: 0,
        }
    }

    /// Add a plugin and register its widget kinds.
    pub fn add_plugin<P: WidgetPlugin>(&mut self, plugin: P) -> WidgetResult<()> {
        let type_id = TypeId::of::<P>();
        if self.plugins.iter().any(|(existing, _)| *existing == type_id) {
            return Err(WidgetError::DuplicatePlugin(plugin.name().to_string()));
        }

        plugin.register_kinds(&mut self.registry);
        tracing::debug!("Added widget plugin '{}'", plugin.name());
        self.plugins.push((type_id, Box::new(plugin)));
        Ok(())
    }

    /// Names of the added plugins, in order.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|(_, plugin)| plugin.name())
    }

    pub fn registry(&self) -> &WidgetKindRegistry {
        &self.registry
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// The root widget.
    pub fn desktop(&self) -> AnyWidgetHandle {
        self.desktop
    }

    /// Parent used when a factory is called without one.
    pub fn active_parent(&self) -> AnyWidgetHandle {
        self.active_parent
    }

    pub fn set_active_parent<K>(&mut self, handle: WidgetHandle<K>) -> WidgetResult<()> {
        let descriptor = self.node(handle)?.descriptor;
        if !descriptor.allows_children() {
            return Err(WidgetError::ChildrenNotAllowed {
                parent: descriptor.name,
            });
        }
        self.active_parent = handle.erase();
        Ok(())
    }

    // -- Allocation --

    /// Allocate a widget of kind `K`.
    ///
    /// The kind must be registered. The new widget receives an
    /// [`Init`](WidgetEvent::Init) event before this returns; if that handler
    /// fails the widget is freed again and the error is returned.
    pub fn create<K: WidgetKind>(&mut self, params: CreateParams) -> WidgetResult<WidgetHandle<K>> {
        let descriptor = K::descriptor();
        if !self.registry.contains(TypeId::of::<K>()) {
            return Err(WidgetError::UnregisteredKind(descriptor.name.to_string()));
        }
        self.create_with(descriptor, params)
            .map(|handle| WidgetHandle::from_slot(handle.slot()))
    }

    /// Allocate a widget of a kind looked up by its registered name.
    pub fn create_by_name(
        &mut self,
        name: &str,
        params: CreateParams,
    ) -> WidgetResult<AnyWidgetHandle> {
        let descriptor = self
            .registry
            .find_by_name(name)
            .ok_or_else(|| WidgetError::UnregisteredKind(name.to_string()))?;
        self.create_with(descriptor, params)
    }

    fn create_with(
        &mut self,
        descriptor: &'static WidgetDescriptor,
        params: CreateParams,
    ) -> WidgetResult<AnyWidgetHandle> {
        profile_function!();
        let parent = params.parent.unwrap_or(self.active_parent);
        let parent_descriptor = self.node(parent)?.descriptor;
        if !parent_descriptor.allows_children() {
            tracing::warn!(
                "Refusing to create {} under {} widget",
                descriptor.name,
                parent_descriptor.name
            );
            return Err(WidgetError::ChildrenNotAllowed {
                parent: parent_descriptor.name,
            });
        }
        self.charge(descriptor.size)?;

        let rect = params.rect;
        let slot = self.nodes.push(WidgetNode {
            descriptor,
            id: params.id,
            callback: params.callback.unwrap_or(descriptor.callback),
            parent: Some(parent),
            children: Vec::new(),
            position: Vec2::new(rect.x, rect.y),
            size: Vec2::new(rect.width, rect.height),
            hidden: params.flags.contains(CreateFlags::HIDDEN),
            colors: None,
            dirty: DirtyFlags::LAYOUT,
        });
        let handle = AnyWidgetHandle::from_slot(slot);

        let parent_node = self.nodes.get_mut(parent.slot());
        parent_node.children.push(handle);
        parent_node.dirty |= DirtyFlags::CHILDREN;

        tracing::debug!(
            "Created {} widget {} at ({}, {}) size {}x{}",
            descriptor.name,
            params.id,
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );

        if let Err(err) = self.dispatch(handle, &mut WidgetEvent::Init) {
            tracing::warn!("Init of {} widget {} failed: {}", descriptor.name, params.id, err);
            self.free_subtree(handle);
            return Err(err);
        }

        // Registered only once the widget exists, so a failed create leaves
        // any live widget with the same ID reachable.
        self.ids.register(params.id, handle);
        Ok(handle)
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Every removed widget receives a [`Remove`](WidgetEvent::Remove) event,
    /// children before their parent. Handles to removed widgets go stale.
    ///
    /// A failing `Remove` handler does not stop the removal: the whole
    /// subtree is still freed and the first handler error is returned.
    pub fn remove<K>(&mut self, handle: WidgetHandle<K>) -> WidgetResult<()> {
        profile_function!();
        let handle = handle.erase();
        if handle == self.desktop {
            return Err(WidgetError::RootRemoval);
        }
        let name = self.node(handle)?.descriptor.name;

        let mut first_error = None;
        for member in self.subtree_bottom_up(handle) {
            if !self.contains(member) {
                continue;
            }
            if let Err(err) = self.dispatch(member, &mut WidgetEvent::Remove) {
                tracing::warn!("Remove handler of {:?} failed: {}", member, err);
                first_error.get_or_insert(err);
            }
        }

        let freed = self.free_subtree(handle);
        tracing::debug!("Removed {} widget ({} nodes freed)", name, freed);
        first_error.map_or(Ok(()), Err)
    }

    /// Unlink `root` from its parent and release it with every descendant.
    /// Returns the number of nodes freed.
    fn free_subtree(&mut self, root: AnyWidgetHandle) -> usize {
        // Handlers may have added children, so walk the tree as it is now.
        let subtree = self.subtree_bottom_up(root);
        self.unlink(root);
        for &member in &subtree {
            self.release(member);
        }

        if !self.contains(self.active_parent) {
            self.active_parent = self.desktop;
        }
        subtree.len()
    }

    fn charge(&mut self, bytes: usize) -> WidgetResult<()> {
        let available = self.memory_available();
        if bytes > available {
            tracing::warn!(
                "Widget memory exhausted: requested {} bytes, {} available",
                bytes,
                available
            );
            return Err(WidgetError::OutOfMemory {
                requested: bytes,
                available,
            });
        }
        self.memory_used += bytes;
        Ok(())
    }

    fn unlink(&mut self, handle: AnyWidgetHandle) {
        let Some(parent) = self.nodes.try_get(handle.slot()).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.try_get_mut(parent.slot()) {
            parent_node.children.retain(|child| *child != handle);
            parent_node.dirty |= DirtyFlags::CHILDREN;
        }
    }

    fn release(&mut self, handle: AnyWidgetHandle) {
        if let Some(node) = self.nodes.try_remove(handle.slot()) {
            self.memory_used = self.memory_used.saturating_sub(node.memory_cost());
            self.ids.unregister(node.id, handle);
        }
    }

    /// Subtree of `root` with every node listed after all of its descendants.
    fn subtree_bottom_up(&self, root: AnyWidgetHandle) -> Vec<AnyWidgetHandle> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.try_get(handle.slot()) {
                order.push(handle);
                stack.extend(node.children.iter().copied());
            }
        }
        order.reverse();
        order
    }

    pub fn memory_used(&self) -> usize {
        self.memory_used
    }

    pub fn memory_available(&self) -> usize {
        self.config.memory_budget.saturating_sub(self.memory_used)
    }

    /// Number of live widgets, including the desktop.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the desktop cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -- Lookup --

    pub fn contains<K>(&self, handle: WidgetHandle<K>) -> bool {
        self.nodes.contains(handle.slot())
    }

    pub fn node<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<&WidgetNode> {
        self.nodes.try_get(handle.slot()).ok_or(WidgetError::StaleHandle)
    }

    fn node_mut<K>(&mut self, handle: WidgetHandle<K>) -> WidgetResult<&mut WidgetNode> {
        self.nodes
            .try_get_mut(handle.slot())
            .ok_or(WidgetError::StaleHandle)
    }

    pub fn descriptor<K>(
        &self,
        handle: WidgetHandle<K>,
    ) -> WidgetResult<&'static WidgetDescriptor> {
        Ok(self.node(handle)?.descriptor)
    }

    /// Whether `handle` is a live widget of kind `K`.
    pub fn is_kind<K: WidgetKind>(&self, handle: AnyWidgetHandle) -> bool {
        self.downcast::<K>(handle).is_ok()
    }

    /// Narrow an unchecked handle to kind `K`.
    pub fn downcast<K: WidgetKind>(
        &self,
        handle: AnyWidgetHandle,
    ) -> WidgetResult<WidgetHandle<K>> {
        let expected = K::descriptor();
        let found = self.node(handle)?.descriptor;
        if std::ptr::eq(found, expected) {
            Ok(WidgetHandle::from_slot(handle.slot()))
        } else {
            Err(WidgetError::KindMismatch {
                expected: expected.name,
                found: found.name,
            })
        }
    }

    /// Most recently created live widget with the given application ID.
    pub fn find_by_id(&self, id: impl Into<WidgetId>) -> Option<AnyWidgetHandle> {
        self.ids.get(id.into()).filter(|handle| self.contains(*handle))
    }

    // -- Geometry --

    pub fn position<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<Vec2> {
        Ok(self.node(handle)?.position)
    }

    /// Position in screen coordinates: the sum of the widget's and all its
    /// ancestors' relative positions.
    pub fn absolute_position<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<Vec2> {
        let mut node = self.node(handle)?;
        let mut position = node.position;
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            position += node.position;
        }
        Ok(position)
    }

    pub fn size<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<Vec2> {
        Ok(self.node(handle)?.size)
    }

    /// Absolute bounding box.
    pub fn absolute_rect<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<Rect<f32>> {
        Ok(Rect::from_origin_size(
            self.absolute_position(handle)?,
            self.size(handle)?,
        ))
    }

    pub fn set_position<K>(&mut self, handle: WidgetHandle<K>, x: f32, y: f32) -> WidgetResult<()> {
        let position = Vec2::new(x, y);
        let node = self.node_mut(handle)?;
        if node.position != position {
            node.position = position;
            self.mark_dirty(handle.erase(), DirtyFlags::LAYOUT);
        }
        Ok(())
    }

    pub fn set_size<K>(
        &mut self,
        handle: WidgetHandle<K>,
        width: f32,
        height: f32,
    ) -> WidgetResult<()> {
        let size = Vec2::new(width, height);
        let node = self.node_mut(handle)?;
        if node.size != size {
            node.size = size;
            self.mark_dirty(handle.erase(), DirtyFlags::LAYOUT);
        }
        Ok(())
    }

    pub fn is_visible<K>(&self, handle: WidgetHandle<K>) -> WidgetResult<bool> {
        Ok(!self.node(handle)?.hidden)
    }

    pub fn set_visible<K>(&mut self, handle: WidgetHandle<K>, visible: bool) -> WidgetResult<()> {
        let node = self.node_mut(handle)?;
        if node.hidden == visible {
            node.hidden = !visible;
            self.mark_dirty(handle.erase(), DirtyFlags::VISIBILITY);
        }
        Ok(())
    }

    // -- Colors --

    /// Resolved color for slot `index`: the per-instance override when one
    /// was set, otherwise the kind's default.
    pub fn color<K>(&self, handle: WidgetHandle<K>, index: u8) -> WidgetResult<Color> {
        let node = self.node(handle)?;
        let defaults = node.descriptor.colors;
        let slot = index as usize;
        if slot >= defaults.len() {
            return Err(WidgetError::InvalidColorIndex {
                index,
                count: defaults.len(),
            });
        }
        Ok(node.colors.as_ref().map_or(defaults[slot], |colors| colors[slot]))
    }

    /// Override color slot `index` for one widget.
    ///
    /// The first override that differs from the default allocates the
    /// widget's own color table (charged against the memory budget). Writing
    /// the value already in effect changes nothing.
    pub fn set_color<K>(
        &mut self,
        handle: WidgetHandle<K>,
        index: u8,
        color: Color,
    ) -> WidgetResult<()> {
        if self.color(handle, index)? == color {
            return Ok(());
        }

        let defaults = self.node(handle)?.descriptor.colors;
        if !self.node(handle)?.has_color_overrides() {
            self.charge(color_table_bytes(defaults.len()))?;
            self.node_mut(handle)?.colors = Some(Box::from(defaults));
        }

        let node = self.node_mut(handle)?;
        if let Some(colors) = node.colors.as_mut() {
            colors[index as usize] = color;
        }
        node.dirty |= DirtyFlags::COLOR;
        tracing::trace!(
            "Set color {} of {} widget {} to {:?}",
            index,
            node.descriptor.name,
            node.id,
            color
        );
        Ok(())
    }

    // -- Events --

    /// Deliver an event to the widget's callback (the override given at
    /// creation, or the kind's callback).
    pub fn dispatch<K>(
        &mut self,
        handle: WidgetHandle<K>,
        event: &mut WidgetEvent<'_>,
    ) -> WidgetResult<bool> {
        let callback = self.node(handle)?.callback;
        tracing::trace!("Dispatching {:?} to {:?}", event, handle);
        callback(self, handle.erase(), event)
    }

    /// Deliver an event to the kind's own callback, bypassing any override.
    ///
    /// Override callbacks call this for events they do not handle themselves.
    pub fn process_default<K>(
        &mut self,
        handle: WidgetHandle<K>,
        event: &mut WidgetEvent<'_>,
    ) -> WidgetResult<bool> {
        let callback = self.node(handle)?.descriptor.callback;
        callback(self, handle.erase(), event)
    }

    // -- Rendering --

    /// Draw every visible widget, parents before children, siblings in
    /// creation order. Hidden widgets hide their whole subtree.
    ///
    /// Returns how many widgets handled the draw. Clears all dirty flags and
    /// closes the profiler frame.
    pub fn render(&mut self, display: &mut dyn Display) -> WidgetResult<usize> {
        let mut handled = 0;
        {
            profile_scope!("paint");
            for handle in self.paint_order() {
                if !self.contains(handle) {
                    continue;
                }
                if self.dispatch(handle, &mut WidgetEvent::Draw(&mut *display))? {
                    handled += 1;
                }
            }
        }

        for node in self.nodes.iter_mut() {
            node.dirty = DirtyFlags::NONE;
        }
        profiling::new_frame();
        Ok(handled)
    }

    fn paint_order(&self) -> Vec<AnyWidgetHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.desktop];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.try_get(handle.slot()) else {
                continue;
            };
            if node.hidden {
                continue;
            }
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    // -- Dirty tracking --

    fn mark_dirty(&mut self, handle: AnyWidgetHandle, flags: DirtyFlags) {
        let Some(node) = self.nodes.try_get_mut(handle.slot()) else {
            return;
        };
        node.dirty |= flags;
        let parent = node.parent;

        if flags.exposes_parent()
            && let Some(parent) = parent
            && let Some(parent_node) = self.nodes.try_get_mut(parent.slot())
        {
            parent_node.dirty |= DirtyFlags::CHILDREN;
        }
    }

    /// Whether anything changed since the last [`render`](Self::render).
    pub fn needs_redraw(&self) -> bool {
        self.nodes.iter().any(|node| !node.dirty.is_empty())
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}
