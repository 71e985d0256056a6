//! Trellis Core
//!
//! Geometry, color, display surfaces and shared utilities for the Trellis
//! widget toolkit.

pub mod alloc;
pub mod color;
pub mod display;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
