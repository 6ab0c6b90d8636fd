//! Inbound commands from the controller app
//!
//! Every line the app sends has the form `<name>=<value>`. The name is an
//! opaque token; a handful of names are reserved for key releases, the
//! all-released sentinel and the setup handshake.

use heapless::String;

/// Maximum command name length in bytes
pub const MAX_NAME_LEN: usize = 32;

/// Separator between name and value
pub const VALUE_SEPARATOR: char = '=';

/// Prefix marking a key release (`!a` releases `a`)
pub const RELEASE_PREFIX: char = '!';

/// Names containing this character are not key-state commands
pub const FIELD_SEPARATOR: char = ';';

/// Sent by the app after connecting to ask whether settings exist
pub const VERSION_QUERY: &str = "-v";

/// Sent by the app to request the button configuration
pub const GET_SETTINGS: &str = "getSettings";

/// Sentinel meaning every key has been released
pub const ALL_RELEASED: &str = "none";

/// Command name storage
pub type CommandName = String<MAX_NAME_LEN>;

/// Errors that can occur while decoding a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Name exceeds [`MAX_NAME_LEN`]
    NameTooLong,
}

/// A single `(name, value)` pair decoded from one inbound line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Command name
    pub name: CommandName,
    /// Command value, NaN when the payload was not numeric
    pub value: f32,
}

impl Command {
    /// Create a command from a name and value
    pub fn new(name: &str, value: f32) -> Result<Self, DecodeError> {
        let mut stored = CommandName::new();
        stored
            .push_str(name)
            .map_err(|_| DecodeError::NameTooLong)?;
        Ok(Self { name: stored, value })
    }

    /// Decode a command from a line (without terminator)
    ///
    /// The name is everything before the first `=`. The value is parsed from
    /// the text between the first and second `=`; a missing or non-numeric
    /// value yields NaN rather than an error.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut parts = line.split(VALUE_SEPARATOR);
        let name = parts.next().unwrap_or("");
        let value = parts.next().map(parse_number).unwrap_or(f32::NAN);
        Self::new(name, value)
    }

    /// Check if this command releases a key
    pub fn is_release(&self) -> bool {
        self.name.starts_with(RELEASE_PREFIX)
    }

    /// Check if this command tracks key state (no `;` in the name)
    pub fn is_key_state(&self) -> bool {
        !self.name.contains(FIELD_SEPARATOR)
    }

    /// Name of the key this command presses or releases
    pub fn key(&self) -> &str {
        self.name
            .strip_prefix(RELEASE_PREFIX)
            .unwrap_or(self.name.as_str())
    }
}

/// Parse the longest numeric prefix of `text`
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, and `Infinity`. Returns NaN if
/// no digits are found.
pub fn parse_number(text: &str) -> f32 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A bare "." only counts when digits surround it
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f32::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f32>().unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let cmd = Command::decode("sr=42.5").unwrap();
        assert_eq!(cmd.name.as_str(), "sr");
        assert_eq!(cmd.value, 42.5);
    }

    #[test]
    fn test_decode_release() {
        let cmd = Command::decode("!a=0").unwrap();
        assert!(cmd.is_release());
        assert!(cmd.is_key_state());
        assert_eq!(cmd.key(), "a");
    }

    #[test]
    fn test_decode_missing_separator_is_nan() {
        let cmd = Command::decode("getSettings").unwrap();
        assert_eq!(cmd.name.as_str(), "getSettings");
        assert!(cmd.value.is_nan());
    }

    #[test]
    fn test_decode_only_first_separator() {
        let cmd = Command::decode("x=12=5").unwrap();
        assert_eq!(cmd.name.as_str(), "x");
        assert_eq!(cmd.value, 12.0);
    }

    #[test]
    fn test_decode_strips_carriage_return() {
        let cmd = Command::decode("b=1\r").unwrap();
        assert_eq!(cmd.name.as_str(), "b");
        assert_eq!(cmd.value, 1.0);
    }

    #[test]
    fn test_decode_config_name_not_key_state() {
        let cmd = Command::decode("vc;x=1").unwrap();
        assert!(!cmd.is_key_state());
    }

    #[test]
    fn test_decode_name_too_long() {
        let result = Command::decode("abcdefghijklmnopqrstuvwxyz0123456789=1");
        assert_eq!(result, Err(DecodeError::NameTooLong));
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12abc"), 12.0);
        assert_eq!(parse_number("  3"), 3.0);
        assert_eq!(parse_number("-1e2"), -100.0);
        assert_eq!(parse_number("1e"), 1.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("7."), 7.0);
        assert_eq!(parse_number("-Infinity"), f32::NEG_INFINITY);
    }

    #[test]
    fn test_parse_number_rejects_non_numeric() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("abc").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("-").is_nan());
    }
}
