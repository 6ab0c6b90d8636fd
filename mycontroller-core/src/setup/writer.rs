//! Button configuration during the setup burst

use mycontroller_protocol::{AppMessage, KeyColor, KeyVisibility};

use crate::traits::{LineSink, LineSinkExt};

/// Writes configuration lines while the app's loader is open
///
/// Handed to [`crate::ControllerApp::on_setup`] between `vc;loader;1;` and
/// `vc;loader;0;`.
pub struct SetupWriter<'a> {
    sink: &'a mut dyn LineSink,
    written: usize,
    dropped: usize,
}

impl<'a> SetupWriter<'a> {
    /// Wrap an outbound sink
    pub fn new(sink: &'a mut dyn LineSink) -> Self {
        Self {
            sink,
            written: 0,
            dropped: 0,
        }
    }

    /// Configure one button in the app
    ///
    /// Absent color or label leave the app's defaults in place.
    pub fn set_button(
        &mut self,
        code: &str,
        visibility: KeyVisibility,
        color: Option<KeyColor>,
        label: Option<&str>,
    ) {
        self.send(&AppMessage::Button {
            code,
            visibility,
            color,
            label,
        });
    }

    /// Number of configuration lines written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Number of configuration lines too long to encode
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn send(&mut self, message: &AppMessage<'_>) {
        match self.sink.send(message) {
            Ok(()) => self.written += 1,
            Err(_) => self.dropped += 1,
        }
    }
}
