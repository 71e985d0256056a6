//! Recording display surface.

use parking_lot::Mutex;
use std::sync::Arc;
use trellis_core::color::Color;
use trellis_core::display::Display;
use trellis_core::geometry::{Rect, Size};

/// A draw call captured by [`MockDisplay`].
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    FillRect { rect: Rect<f32>, color: Color },
}

/// Display that records calls for later assertions.
///
/// Clones share one call log, so a test can keep a clone for inspection
/// while another is borrowed mutably by the code under test.
#[derive(Clone)]
pub struct MockDisplay {
    size: Size<f32>,
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl MockDisplay {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Copy of all recorded calls.
    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().clone()
    }

    /// Rectangles of every recorded fill, in call order.
    pub fn filled_rects(&self) -> Vec<(Rect<f32>, Color)> {
        self.calls
            .lock()
            .iter()
            .map(|call| match call {
                DisplayCall::FillRect { rect, color } => (*rect, *color),
            })
            .collect()
    }

    pub fn count_fill_rects(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, DisplayCall::FillRect { .. }))
            .count()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget recorded calls (between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new(480.0, 272.0)
    }
}

impl Display for MockDisplay {
    fn fill_rect(&mut self, rect: Rect<f32>, color: Color) {
        self.calls.lock().push(DisplayCall::FillRect { rect, color });
    }

    fn size(&self) -> Size<f32> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_call_log() {
        let observer = MockDisplay::new(10.0, 10.0);
        let mut drawer = observer.clone();

        drawer.fill_rect(Rect::new(1.0, 2.0, 3.0, 4.0), Color::BLUE);

        assert_eq!(observer.count_fill_rects(), 1);
        assert_eq!(
            observer.filled_rects(),
            vec![(Rect::new(1.0, 2.0, 3.0, 4.0), Color::BLUE)]
        );

        observer.clear_calls();
        assert_eq!(drawer.call_count(), 0);
    }
}
