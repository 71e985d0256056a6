//! Events delivered to widget callbacks.

use trellis_core::display::Display;
use trellis_core::math::Vec2;

/// Event passed to a [`WidgetCallback`](crate::plugin::WidgetCallback).
///
/// Event-specific parameters travel inside the variant; the callback's
/// boolean result tells the tree whether the event was handled.
pub enum WidgetEvent<'a> {
    /// Widget was just allocated and linked into the tree.
    Init,
    /// Paint the widget onto the given surface.
    Draw(&'a mut dyn Display),
    /// Widget is about to be freed.
    Remove,
    /// Pointer click at an absolute position.
    Click { position: Vec2 },
    /// Focus gained.
    FocusIn,
    /// Focus lost.
    FocusOut,
}

/// Payload-free discriminant of [`WidgetEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Init,
    Draw,
    Remove,
    Click,
    FocusIn,
    FocusOut,
}

impl WidgetEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            WidgetEvent::Init => EventKind::Init,
            WidgetEvent::Draw(_) => EventKind::Draw,
            WidgetEvent::Remove => EventKind::Remove,
            WidgetEvent::Click { .. } => EventKind::Click,
            WidgetEvent::FocusIn => EventKind::FocusIn,
            WidgetEvent::FocusOut => EventKind::FocusOut,
        }
    }
}

impl std::fmt::Debug for WidgetEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetEvent::Click { position } => {
                f.debug_struct("Click").field("position", position).finish()
            }
            other => write!(f, "{:?}", other.kind()),
        }
    }
}
