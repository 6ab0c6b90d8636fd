//! My Controller Bluetooth UART protocol
//!
//! This crate defines the text protocol between the controller app on a
//! phone and the device. The app talks to the device over a Bluetooth UART
//! link; the device never initiates anything except configuration replies.
//!
//! # Protocol Overview
//!
//! Inbound, one command per line:
//! ```text
//! <name>=<value>\n
//! ```
//!
//! Outbound, `;`-separated fields behind a `vc` marker:
//! ```text
//! vc;b;<code>;<visibility>;<color>;<label>
//! vc;hasSettings;1;
//! vc;loader;1;  ...  vc;loader;0;
//! ```
//!
//! Values are decoded best-effort: a value that is not a number becomes NaN
//! and is passed on unchanged.

#![no_std]
#![deny(unsafe_code)]

pub mod codes;
pub mod command;
pub mod line;
pub mod messages;

pub use codes::{
    AxisCode, InputSide, JoystickAxis, KeyCode, KeyColor, KeyState, KeyVisibility,
    OrientationAxis,
};
pub use command::{Command, CommandName, DecodeError, MAX_NAME_LEN};
pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
pub use messages::{AppMessage, EncodeError, MessageLine, MAX_MESSAGE_LEN};
