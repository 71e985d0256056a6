//! Container widget: a plain rectangle that holds other widgets.

use crate::error::WidgetResult;
use crate::event::WidgetEvent;
use crate::plugin::{KindFlags, WidgetCallback, WidgetDescriptor, WidgetKind};
use crate::tree::{CreateFlags, CreateParams, WidgetNode, WidgetTree};
use crate::widget::{AnyWidgetHandle, WidgetHandle};
use crate::widget_id::WidgetId;
use trellis_core::color::Color;
use trellis_core::geometry::Rect;
use trellis_core::profiling::profile_function;

/// Kind tag for container widgets.
///
/// A container fills its bounding box with its background color on every
/// draw and ignores all other events. Children are painted on top of it.
pub struct Container;

/// Color slots of a [`Container`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerColor {
    Background = 0,
}

impl ContainerColor {
    pub const COUNT: usize = 1;
}

static COLORS: [Color; ContainerColor::COUNT] = [Color::WIN_BLUE];

static DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
    name: "CONTAINER",
    size: std::mem::size_of::<WidgetNode>(),
    flags: KindFlags::ALLOW_CHILDREN,
    callback: container_callback,
    colors: &COLORS,
};

impl WidgetKind for Container {
    fn descriptor() -> &'static WidgetDescriptor {
        &DESCRIPTOR
    }
}

impl Container {
    /// Create a container at `(x, y)` relative to its parent.
    ///
    /// `parent: None` places it under the tree's active parent and
    /// `callback: None` keeps the container's own event handler. An override
    /// callback can forward unhandled events with
    /// [`WidgetTree::process_default`].
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        tree: &mut WidgetTree,
        id: impl Into<WidgetId>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        parent: Option<AnyWidgetHandle>,
        callback: Option<WidgetCallback>,
        flags: CreateFlags,
    ) -> WidgetResult<WidgetHandle<Container>> {
        tree.create::<Container>(CreateParams {
            id: id.into(),
            rect: Rect::new(x, y, width, height),
            parent,
            callback,
            flags,
        })
    }

    /// Set one of the container's colors.
    ///
    /// Fails with [`KindMismatch`](crate::error::WidgetError::KindMismatch)
    /// when `handle` refers to a widget of another kind.
    pub fn set_color<K>(
        tree: &mut WidgetTree,
        handle: WidgetHandle<K>,
        index: ContainerColor,
        color: Color,
    ) -> WidgetResult<()> {
        let handle = tree.downcast::<Container>(handle.erase())?;
        tree.set_color(handle, index as u8, color)
    }

    /// Color currently in effect for `index`.
    pub fn color<K>(
        tree: &WidgetTree,
        handle: WidgetHandle<K>,
        index: ContainerColor,
    ) -> WidgetResult<Color> {
        let handle = tree.downcast::<Container>(handle.erase())?;
        tree.color(handle, index as u8)
    }
}

fn container_callback(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    let handle = tree.downcast::<Container>(handle)?;
    match event {
        WidgetEvent::Draw(display) => {
            profile_function!();
            let rect = tree.absolute_rect(handle)?;
            let color = tree.color(handle, ContainerColor::Background as u8)?;
            display.fill_rect(rect, color);
            Ok(true)
        }
        _ => Ok(false),
    }
}
