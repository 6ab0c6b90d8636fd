//! Minimal TOML parser for controller configuration
//!
//! Handles only the subset used by `controller.toml`, not full TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[router]`, `[setup]` and `[button.<code>]` section headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Escapes in strings
//! - Arrays and inline tables
//! - Multi-line strings
//!
//! ```toml
//! [router]
//! tick_ms = 20
//!
//! [setup]
//! confirmation = "required"   # or "none"
//!
//! [button.a]
//! visible = true
//! color = "green"
//! label = "Jump"
//! ```

use core::fmt::Write;

use heapless::String;

use mycontroller_protocol::{KeyColor, KeyVisibility};

use super::types::{ButtonConfig, ControllerConfig};
use crate::setup::SetupConfirmation;

/// Longest accepted drain interval in milliseconds
pub const MAX_TICK_MS: u16 = 1000;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is not `key = value` or the value has the wrong type
    InvalidValue,
    /// Key is not valid in the current section
    UnknownKey,
    /// Too many buttons
    TooManyItems,
    /// String does not fit its field
    ValueTooLong,
    /// Same button code configured twice
    DuplicateButton,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Router,
    Setup,
    /// Keys apply to the last pushed button
    Button,
}

/// Parsed right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
}

/// Parse TOML configuration into ControllerConfig
pub fn parse_config(input: &str) -> Result<ControllerConfig, ParseError> {
    let mut config = ControllerConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = open_section(header.trim(), &mut config)?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidValue)?;
        let key = key.trim();
        let value = parse_value(value.trim())?;

        match section {
            Section::Root => return Err(ParseError::UnknownKey),
            Section::Router => apply_router_key(&mut config, key, value)?,
            Section::Setup => apply_setup_key(&mut config, key, value)?,
            Section::Button => {
                let button = config
                    .buttons
                    .last_mut()
                    .ok_or(ParseError::InvalidSection)?;
                apply_button_key(button, key, value)?;
            }
        }
    }

    Ok(config)
}

fn open_section(header: &str, config: &mut ControllerConfig) -> Result<Section, ParseError> {
    match header {
        "router" => Ok(Section::Router),
        "setup" => {
            // The section alone enables the handshake
            config.setup.get_or_insert(SetupConfirmation::Required);
            Ok(Section::Setup)
        }
        _ => {
            let code = header
                .strip_prefix("button.")
                .map(unquote)
                .filter(|code| !code.is_empty())
                .ok_or(ParseError::InvalidSection)?;

            if config.find_button(code).is_some() {
                return Err(ParseError::DuplicateButton);
            }

            let button = ButtonConfig {
                code: String::try_from(code).map_err(|_| ParseError::ValueTooLong)?,
                ..Default::default()
            };
            config
                .buttons
                .push(button)
                .map_err(|_| ParseError::TooManyItems)?;
            Ok(Section::Button)
        }
    }
}

fn apply_router_key(
    config: &mut ControllerConfig,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (key, value) {
        ("tick_ms", Value::Int(ms)) if (1..=MAX_TICK_MS as i64).contains(&ms) => {
            config.tick_ms = ms as u16;
            Ok(())
        }
        ("tick_ms", _) => Err(ParseError::InvalidValue),
        _ => Err(ParseError::UnknownKey),
    }
}

fn apply_setup_key(
    config: &mut ControllerConfig,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (key, value) {
        ("confirmation", Value::Str("required")) => {
            config.setup = Some(SetupConfirmation::Required);
            Ok(())
        }
        ("confirmation", Value::Str("none")) => {
            config.setup = Some(SetupConfirmation::NotRequired);
            Ok(())
        }
        ("enabled", Value::Bool(enabled)) => {
            config.setup = if enabled {
                Some(config.setup.unwrap_or_default())
            } else {
                None
            };
            Ok(())
        }
        ("confirmation" | "enabled", _) => Err(ParseError::InvalidValue),
        _ => Err(ParseError::UnknownKey),
    }
}

fn apply_button_key(
    button: &mut ButtonConfig,
    key: &str,
    value: Value<'_>,
) -> Result<(), ParseError> {
    match (key, value) {
        ("visible", Value::Bool(visible)) => {
            button.visibility = if visible {
                KeyVisibility::Visible
            } else {
                KeyVisibility::Hidden
            };
        }
        ("color", Value::Str(name)) => {
            button.color = Some(KeyColor::from_name(name).ok_or(ParseError::InvalidValue)?);
        }
        ("label", Value::Str(text)) => {
            button.label = Some(String::try_from(text).map_err(|_| ParseError::ValueTooLong)?);
        }
        ("label", Value::Int(number)) => {
            let mut label = String::new();
            write!(label, "{}", number).map_err(|_| ParseError::ValueTooLong)?;
            button.label = Some(label);
        }
        ("visible" | "color" | "label", _) => return Err(ParseError::InvalidValue),
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_value(text: &str) -> Result<Value<'_>, ParseError> {
    if let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        return Ok(Value::Str(inner));
    }
    match text {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ParseError::InvalidValue),
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

/// Cut a trailing `# comment`, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}
