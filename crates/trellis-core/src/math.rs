//! Vector math re-exported from [`glam`].
//!
//! ```
//! use trellis_core::math::Vec2;
//!
//! let origin = Vec2::new(10.0, 20.0);
//! let offset = origin + Vec2::new(5.0, 5.0);
//! assert_eq!(offset, Vec2::new(15.0, 25.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::Vec2;
