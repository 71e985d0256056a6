//! Built-in widget kinds.

pub mod container;
pub mod desktop;

pub use container::{Container, ContainerColor};
pub use desktop::Desktop;
