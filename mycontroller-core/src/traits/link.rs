//! Outbound link to the controller app

use mycontroller_protocol::{AppMessage, EncodeError};

/// Trait for the line-oriented write side of the Bluetooth UART link
///
/// Implementations append the line terminator. Writes either go out or are
/// dropped; the app has no way to acknowledge them, so there is nothing to
/// report back to the caller.
pub trait LineSink {
    /// Write one line (without terminator)
    fn write_line(&mut self, line: &str);
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line)
    }
}

/// Helper trait for sending protocol messages
pub trait LineSinkExt: LineSink {
    /// Encode and write a protocol message
    fn send(&mut self, message: &AppMessage<'_>) -> Result<(), EncodeError> {
        let line = message.encode()?;
        self.write_line(&line);
        Ok(())
    }
}

impl<T: LineSink + ?Sized> LineSinkExt for T {}
