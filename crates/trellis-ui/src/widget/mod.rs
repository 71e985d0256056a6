//! Widget handles.

pub mod handle;

pub use handle::{AnyKind, AnyWidgetHandle, WidgetHandle};
