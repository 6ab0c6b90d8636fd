//! Line framing for the Bluetooth UART byte stream.
//!
//! The controller app sends one command per line, terminated by `\n`.
//! Some app builds send `\r\n`, so a trailing `\r` is dropped. Empty lines
//! carry nothing and are skipped.

use heapless::{String, Vec};

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Optional byte before [`LINE_END`]
const CARRIAGE_RETURN: u8 = b'\r';

/// Maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// Errors that can occur while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; the partial line was discarded
    Overflow,
    /// Line was not valid UTF-8
    InvalidUtf8,
}

/// A complete line without its terminator
pub type Line = String<MAX_LINE_LEN>;

/// Accumulates bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// Set after an overflow until the next terminator
    discarding: bool,
    /// `\r` seen but not yet stored; dropped if `\n` follows
    carriage_return: bool,
}

impl LineParser {
    /// Create a new line parser
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
            carriage_return: false,
        }
    }

    /// Reset the parser state, dropping any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
        self.carriage_return = false;
    }

    /// Number of bytes buffered for the current line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err` when the current line
    /// had to be dropped. Overflow is reported once; the remaining bytes of
    /// that line are skipped silently.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == LINE_END {
            if self.discarding {
                self.reset();
                return Ok(None);
            }
            return self.take_line();
        }

        if self.discarding {
            return Ok(None);
        }

        // A `\r` not followed by `\n` is line content
        if core::mem::take(&mut self.carriage_return) {
            self.push(CARRIAGE_RETURN)?;
        }

        if byte == CARRIAGE_RETURN {
            self.carriage_return = true;
            return Ok(None);
        }
        self.push(byte)?;
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete line found together with the number of
    /// bytes consumed, so the caller can resume with the remainder.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<Line>, LineError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (i + 1, other),
            }
        }
        (bytes.len(), Ok(None))
    }

    fn push(&mut self, byte: u8) -> Result<(), LineError> {
        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
            return Err(LineError::Overflow);
        }
        Ok(())
    }

    fn take_line(&mut self) -> Result<Option<Line>, LineError> {
        self.carriage_return = false;
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let result = match core::str::from_utf8(&self.buffer) {
            Ok(text) => {
                let mut line = Line::new();
                // Cannot fail: buffer and line share the same capacity
                let _ = line.push_str(text);
                Ok(Some(line))
            }
            Err(_) => Err(LineError::InvalidUtf8),
        };
        self.buffer.clear();
        result
    }
}
