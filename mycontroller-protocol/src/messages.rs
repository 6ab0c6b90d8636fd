//! Outbound messages to the controller app
//!
//! All outbound lines start with the `vc` marker followed by `;`-separated
//! fields:
//! - `vc;b;<code>;<visibility>;<color>;<label>` configures one button
//! - `vc;hasSettings;1;` announces that settings are available
//! - `vc;loader;1;` / `vc;loader;0;` bracket a configuration burst

use core::fmt::Write;

use heapless::String;

use crate::codes::{KeyColor, KeyVisibility};

/// Maximum outbound line length in bytes, excluding the terminator
pub const MAX_MESSAGE_LEN: usize = 64;

/// Marker for button configuration lines
pub const BUTTON_MARKER: &str = "vc;b";

/// Settings-available announcement
pub const HAS_SETTINGS: &str = "vc;hasSettings;1;";

/// Start of a configuration burst
pub const LOADER_START: &str = "vc;loader;1;";

/// End of a configuration burst
pub const LOADER_END: &str = "vc;loader;0;";

/// Encoded outbound line
pub type MessageLine = String<MAX_MESSAGE_LEN>;

/// Errors that can occur during message encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Encoded line exceeds [`MAX_MESSAGE_LEN`]
    LineTooLong,
}

/// Messages from the device to the app that carry fields
///
/// The fixed handshake lines are plain constants: [`HAS_SETTINGS`],
/// [`LOADER_START`] and [`LOADER_END`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppMessage<'a> {
    /// Configure a button
    Button {
        code: &'a str,
        visibility: KeyVisibility,
        color: Option<KeyColor>,
        label: Option<&'a str>,
    },
}

impl<'a> AppMessage<'a> {
    /// Encode this message into a single line (without terminator)
    pub fn encode(&self) -> Result<MessageLine, EncodeError> {
        let mut line = MessageLine::new();
        match self {
            AppMessage::Button {
                code,
                visibility,
                color,
                label,
            } => {
                write!(line, "{};{};{};", BUTTON_MARKER, code, visibility.to_wire())
                    .map_err(|_| EncodeError::LineTooLong)?;
                if let Some(color) = color {
                    write!(line, "{}", color.to_wire()).map_err(|_| EncodeError::LineTooLong)?;
                }
                line.push(';').map_err(|_| EncodeError::LineTooLong)?;
                if let Some(label) = label {
                    line.push_str(label)
                        .map_err(|_| EncodeError::LineTooLong)?;
                }
            }
        }
        Ok(line)
    }
}
