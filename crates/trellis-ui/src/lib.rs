//! Trellis UI - retained widget tree for small framebuffer displays
//!
//! This crate provides the widget layer of the Trellis toolkit:
//! - A generational widget tree with parent/child links and a desktop root
//! - Widget kinds described by static descriptors (name, size, flags,
//!   callback, default colors) and registered through plugins
//! - Per-instance color overrides and a fixed memory budget
//! - Event dispatch through per-kind or per-instance callbacks
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_ui::{Color, Container, ContainerColor, CreateFlags, Framebuffer, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let flags = CreateFlags::empty();
//! let panel = Container::create(&mut tree, "panel", 10.0, 10.0, 100.0, 50.0, None, None, flags)?;
//! Container::set_color(&mut tree, panel, ContainerColor::Background, Color::GRAY)?;
//!
//! let mut framebuffer = Framebuffer::new(480, 272);
//! let painted = tree.render(&mut framebuffer)?;
//! assert_eq!(painted, 1);
//! assert_eq!(framebuffer.pixel(10, 10), Some(Color::GRAY.to_argb8888()));
//! # Ok::<(), trellis_ui::WidgetError>(())
//! ```

pub mod config;
pub mod dirty;
pub mod error;
pub mod event;
pub mod plugin;
pub mod tree;
pub mod widget;
pub mod widget_id;
pub mod widgets;

pub use config::UiConfig;
pub use dirty::DirtyFlags;
pub use error::{WidgetError, WidgetResult};
pub use event::{EventKind, WidgetEvent};
pub use plugin::{
    CorePlugin, KindFlags, WidgetCallback, WidgetDescriptor, WidgetKind, WidgetKindRegistry,
    WidgetPlugin,
};
pub use tree::{CreateFlags, CreateParams, WidgetNode, WidgetTree};
pub use widget::{AnyKind, AnyWidgetHandle, WidgetHandle};
pub use widget_id::WidgetId;
pub use widgets::{Container, ContainerColor, Desktop};

pub use trellis_core::color::Color;
pub use trellis_core::display::{Display, Framebuffer};
pub use trellis_core::geometry::Rect;
pub use trellis_core::math::Vec2;
