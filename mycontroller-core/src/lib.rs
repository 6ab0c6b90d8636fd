//! Board-agnostic core logic for the My Controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Command router (pending table, pressed keys, toggles, axis cache)
//! - Setup handshake state machine
//! - Outbound line sink trait
//! - Configuration types and the `controller.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod router;
pub mod setup;
pub mod traits;

#[cfg(test)]
mod testing;

pub use app::{ControllerApp, FnApp};
pub use router::{CommandContext, CommandRouter, ReceiveError};
pub use setup::{SetupConfirmation, SetupWriter};
pub use traits::{LineSink, LineSinkExt};
