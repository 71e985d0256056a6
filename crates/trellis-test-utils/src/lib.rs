//! Test utilities for the Trellis toolkit.
//!
//! - [`MockDisplay`] - a [`Display`](trellis_core::display::Display) that
//!   records every draw call instead of rasterizing (requires the `mock`
//!   feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use trellis_core::color::Color;
//! use trellis_core::display::Display;
//! use trellis_core::geometry::Rect;
//! use trellis_test_utils::{DisplayCall, MockDisplay};
//!
//! let mut mock = MockDisplay::new(320.0, 240.0);
//! mock.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
//!
//! assert_eq!(mock.count_fill_rects(), 1);
//! assert_eq!(
//!     mock.calls(),
//!     vec![DisplayCall::FillRect {
//!         rect: Rect::new(0.0, 0.0, 10.0, 10.0),
//!         color: Color::RED,
//!     }]
//! );
//! # }
//! ```

#[cfg(feature = "mock")]
pub mod mock_display;

#[cfg(feature = "mock")]
pub use mock_display::*;
