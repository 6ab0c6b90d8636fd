//! Setup handshake with the controller app
//!
//! On connect the app asks whether the device has a button layout for it.
//! The layout is sent as a burst of configuration lines bracketed by loader
//! markers, so the app can show a spinner until the burst is complete.

pub mod events;
pub mod machine;
pub mod writer;

pub use events::HandshakeEvent;
pub use machine::{HandshakeAction, HandshakePhase, SetupConfirmation};
pub use writer::SetupWriter;

use mycontroller_protocol::messages::{HAS_SETTINGS, LOADER_END, LOADER_START};

use crate::app::ControllerApp;
use crate::traits::LineSink;

/// Handshake registration and progress
///
/// Holds at most one registration; registering again replaces the mode.
#[derive(Debug, Default)]
pub struct SetupHandshake {
    mode: Option<SetupConfirmation>,
    phase: HandshakePhase,
}

impl SetupHandshake {
    /// Create an unregistered handshake
    pub const fn new() -> Self {
        Self {
            mode: None,
            phase: HandshakePhase::Idle,
        }
    }

    /// Enable the handshake, replacing any previous registration
    pub fn register(&mut self, mode: SetupConfirmation) {
        self.mode = Some(mode);
        self.phase = HandshakePhase::Idle;
    }

    /// Disable the handshake
    pub fn unregister(&mut self) {
        self.mode = None;
        self.phase = HandshakePhase::Idle;
    }

    /// Registered mode, if any
    pub fn mode(&self) -> Option<SetupConfirmation> {
        self.mode
    }

    /// Current phase
    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// Handshake event carried by `name`, if the registered mode reacts to it
    pub fn trigger_for(&self, name: &str) -> Option<HandshakeEvent> {
        let mode = self.mode?;
        HandshakeEvent::from_command(name).filter(|event| mode.is_trigger(*event))
    }

    /// Restart the exchange for a new connection; the registration is kept
    pub fn on_connected(&mut self) {
        if let Some(mode) = self.mode {
            self.phase = self.phase.transition(mode, HandshakeEvent::Connected).0;
        }
    }

    /// Run the handshake for an app request
    ///
    /// The configuration burst calls `app.on_setup` synchronously between
    /// the loader markers. Without a registration this does nothing.
    pub fn handle<A: ControllerApp + ?Sized>(
        &mut self,
        event: HandshakeEvent,
        app: &mut A,
        sink: &mut dyn LineSink,
    ) -> HandshakeAction {
        let Some(mode) = self.mode else {
            return HandshakeAction::None;
        };

        let (next, action) = self.phase.transition(mode, event);
        self.phase = next;

        match action {
            HandshakeAction::None => {}
            HandshakeAction::AnnounceSettings => {
                sink.write_line(HAS_SETTINGS);
            }
            HandshakeAction::SendConfiguration => {
                sink.write_line(LOADER_START);
                app.on_setup(&mut SetupWriter::new(sink));
                sink.write_line(LOADER_END);
                self.phase = self
                    .phase
                    .transition(mode, HandshakeEvent::ConfigurationSent)
                    .0;
            }
        }
        action
    }
}
