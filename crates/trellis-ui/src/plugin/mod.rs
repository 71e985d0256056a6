//! Plugin hook for registering widget kinds.
//!
//! A [`WidgetPlugin`] contributes widget kinds to a tree's
//! [`WidgetKindRegistry`]. [`CorePlugin`] is added by every
//! [`WidgetTree`](crate::tree::WidgetTree) and registers the built-in kinds;
//! applications add their own kinds through
//! [`WidgetTree::add_plugin`](crate::tree::WidgetTree::add_plugin).
//!
//! # Example
//!
//! ```ignore
//! struct GaugePlugin;
//!
//! impl WidgetPlugin for GaugePlugin {
//!     fn name(&self) -> &str {
//!         "gauge"
//!     }
//!
//!     fn register_kinds(&self, registry: &mut WidgetKindRegistry) {
//!         registry.register::<Gauge>();
//!     }
//! }
//!
//! tree.add_plugin(GaugePlugin)?;
//! ```

pub mod registry;

pub use registry::{KindFlags, WidgetCallback, WidgetDescriptor, WidgetKind, WidgetKindRegistry};

use std::any::Any;

/// A bundle of widget kinds.
pub trait WidgetPlugin: Any + 'static {
    /// Plugin name for debugging and logging.
    fn name(&self) -> &str;

    /// Register the kinds this plugin provides. Called once, when added.
    fn register_kinds(&self, registry: &mut WidgetKindRegistry);
}

/// Built-in kinds: desktop and container.
pub struct CorePlugin;

impl WidgetPlugin for CorePlugin {
    fn name(&self) -> &str {
        "core"
    }

    fn register_kinds(&self, registry: &mut WidgetKindRegistry) {
        use crate::widgets::{Container, Desktop};

        registry.register::<Desktop>();
        registry.register::<Container>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Container, Desktop};
    use std::any::TypeId;

    #[test]
    fn test_core_plugin_registers_kinds() {
        let mut registry = WidgetKindRegistry::new();
        CorePlugin.register_kinds(&mut registry);

        assert!(registry.contains(TypeId::of::<Desktop>()));
        assert!(registry.contains(TypeId::of::<Container>()));
        assert_eq!(registry.names().collect::<Vec<_>>(), ["DESKTOP", "CONTAINER"]);
    }
}
