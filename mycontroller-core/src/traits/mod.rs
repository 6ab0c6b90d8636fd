//! Transport abstraction traits
//!
//! These traits define the interface between the router and the
//! board-specific Bluetooth UART implementation.

pub mod link;

pub use link::{LineSink, LineSinkExt};
