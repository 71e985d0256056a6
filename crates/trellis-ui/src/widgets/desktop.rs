//! Root widget of every tree.

use crate::error::WidgetResult;
use crate::event::WidgetEvent;
use crate::plugin::{KindFlags, WidgetDescriptor, WidgetKind};
use crate::tree::{WidgetNode, WidgetTree};
use crate::widget::AnyWidgetHandle;

/// The screen-sized root. It paints nothing and exists to parent everything
/// else; [`WidgetTree`] creates exactly one and refuses to remove it.
pub struct Desktop;

static DESCRIPTOR: WidgetDescriptor = WidgetDescriptor {
    name: "DESKTOP",
    size: std::mem::size_of::<WidgetNode>(),
    flags: KindFlags::ALLOW_CHILDREN,
    callback: desktop_callback,
    colors: &[],
};

impl WidgetKind for Desktop {
    fn descriptor() -> &'static WidgetDescriptor {
        &DESCRIPTOR
    }
}

fn desktop_callback(
    tree: &mut WidgetTree,
    handle: AnyWidgetHandle,
    _event: &mut WidgetEvent<'_>,
) -> WidgetResult<bool> {
    tree.downcast::<Desktop>(handle)?;
    Ok(false)
}
