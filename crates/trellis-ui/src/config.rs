//! Widget tree configuration.

use trellis_core::geometry::Size;

/// Configuration for a [`WidgetTree`](crate::tree::WidgetTree).
///
/// ```
/// use trellis_ui::UiConfig;
///
/// let config = UiConfig::default()
///     .with_screen_size(320.0, 240.0)
///     .with_memory_budget(4 * 1024);
/// assert_eq!(config.memory_budget, 4096);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Size of the desktop root widget, normally the display resolution.
    pub screen_size: Size<f32>,
    /// Bytes available for widget instances and per-instance color tables.
    pub memory_budget: usize,
}

impl UiConfig {
    pub const DEFAULT_SCREEN_SIZE: Size<f32> = Size::new(480.0, 272.0);
    pub const DEFAULT_MEMORY_BUDGET: usize = 16 * 1024;

    pub fn with_screen_size(mut self, width: f32, height: f32) -> Self {
        self.screen_size = Size::new(width, height);
        self
    }

    pub fn with_memory_budget(mut self, bytes: usize) -> Self {
        self.memory_budget = bytes;
        self
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            screen_size: Self::DEFAULT_SCREEN_SIZE,
            memory_budget: Self::DEFAULT_MEMORY_BUDGET,
        }
    }
}
