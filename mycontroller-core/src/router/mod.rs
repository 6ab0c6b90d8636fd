//! Command router
//!
//! Decoded commands are queued by name, then drained one at a time: each
//! drained command updates the key and axis state and is handed to the
//! application before the next one is considered.
//!
//! ```text
//! line ──▶ decode ──▶ PendingCommands ──▶ drain ──┬─▶ setup handshake
//!                                                 ├─▶ pressed keys
//!                                                 ├─▶ axis cache
//!                                                 └─▶ app.on_command
//! ```

pub mod axes;
pub mod context;
pub mod keys;
pub mod pending;

pub use axes::AxisCache;
pub use context::CommandContext;
pub use keys::{KeyError, PressedKeys, ToggleStates};
pub use pending::{PendingCommands, PendingError};

use mycontroller_protocol::{Command, DecodeError};

use crate::app::{ControllerApp, FnApp};
use crate::setup::{HandshakePhase, SetupConfirmation, SetupHandshake};
use crate::traits::LineSink;

/// Errors that can occur when accepting an inbound line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveError {
    /// Line could not be decoded
    Decode(DecodeError),
    /// Pending table is full
    Pending(PendingError),
}

impl From<DecodeError> for ReceiveError {
    fn from(e: DecodeError) -> Self {
        ReceiveError::Decode(e)
    }
}

impl From<PendingError> for ReceiveError {
    fn from(e: PendingError) -> Self {
        ReceiveError::Pending(e)
    }
}

/// Owns all controller state for one app connection
#[derive(Debug, Default)]
pub struct CommandRouter {
    pending: PendingCommands,
    current: Option<Command>,
    pressed: PressedKeys,
    toggles: ToggleStates,
    axes: AxisCache,
    setup: SetupHandshake,
    /// Presses that did not fit in the pressed set
    untracked_keys: usize,
}

impl CommandRouter {
    /// Create a router with no setup registration
    pub const fn new() -> Self {
        Self {
            pending: PendingCommands::new(),
            current: None,
            pressed: PressedKeys::new(),
            toggles: ToggleStates::new(),
            axes: AxisCache::new(),
            setup: SetupHandshake::new(),
            untracked_keys: 0,
        }
    }

    /// Decode a line and queue it
    pub fn receive_line(&mut self, line: &str) -> Result<(), ReceiveError> {
        let command = Command::decode(line)?;
        self.receive(command)?;
        Ok(())
    }

    /// Queue a decoded command, replacing an undrained value for its name
    pub fn receive(&mut self, command: Command) -> Result<(), PendingError> {
        self.pending.insert(command)
    }

    /// The transport reported a fresh connection
    ///
    /// Releases all keys and restarts the handshake. Toggle counters, cached
    /// axis values and the setup registration survive.
    pub fn on_connected(&mut self) {
        self.pressed.clear();
        self.setup.on_connected();
    }

    /// Enable the setup handshake, replacing any previous registration
    pub fn register_setup(&mut self, mode: SetupConfirmation) {
        self.setup.register(mode);
    }

    /// Disable the setup handshake
    pub fn unregister_setup(&mut self) {
        self.setup.unregister();
    }

    /// Drain every pending command through `app`
    ///
    /// Returns the number of commands handed to `app.on_command`. Handshake
    /// requests are answered here and not passed on.
    pub fn drain<A: ControllerApp + ?Sized>(
        &mut self,
        app: &mut A,
        sink: &mut dyn LineSink,
    ) -> usize {
        let mut dispatched = 0;
        while let Some(command) = self.pending.pop() {
            if self.dispatch(command, app, sink) {
                dispatched += 1;
            }
        }
        dispatched
    }

    /// Drain every pending command through a closure
    pub fn drain_with<F>(&mut self, sink: &mut dyn LineSink, handler: F) -> usize
    where
        F: FnMut(&mut CommandContext<'_>),
    {
        self.drain(&mut FnApp(handler), sink)
    }

    fn dispatch<A: ControllerApp + ?Sized>(
        &mut self,
        command: Command,
        app: &mut A,
        sink: &mut dyn LineSink,
    ) -> bool {
        let command = self.current.insert(command);

        if let Some(event) = self.setup.trigger_for(&command.name) {
            self.setup.handle(event, app, sink);
            return false;
        }

        if command.is_key_state() {
            if command.is_release() {
                self.pressed.release(command.key());
            } else if self.pressed.press(&command.name).is_err() {
                self.untracked_keys += 1;
            }
        }

        self.axes.update(&command.name, command.value);

        let mut ctx = CommandContext::new(command, &self.pressed, &self.axes, &mut self.toggles);
        app.on_command(&mut ctx);
        true
    }

    /// Most recently drained command
    pub fn current(&self) -> Option<&Command> {
        self.current.as_ref()
    }

    /// Commands waiting to be drained
    pub fn pending(&self) -> &PendingCommands {
        &self.pending
    }

    /// Keys currently held down
    pub fn pressed_keys(&self) -> &PressedKeys {
        &self.pressed
    }

    /// Cached axis values
    pub fn axes(&self) -> &AxisCache {
        &self.axes
    }

    /// Toggle counters
    pub fn toggles(&self) -> &ToggleStates {
        &self.toggles
    }

    /// Registered setup mode, if any
    pub fn setup_mode(&self) -> Option<SetupConfirmation> {
        self.setup.mode()
    }

    /// Current handshake phase
    pub fn setup_phase(&self) -> HandshakePhase {
        self.setup.phase()
    }

    /// Number of presses dropped because the pressed set was full
    pub fn untracked_keys(&self) -> usize {
        self.untracked_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::SetupWriter;
    use crate::testing::RecordingSink;
    use heapless::{String, Vec};
    use mycontroller_protocol::{AxisCode, InputSide, KeyColor, KeyState, KeyVisibility};

    /// Records what the app saw for every command
    #[derive(Default)]
    struct Recorder {
        names: Vec<String<32>, 32>,
        a_pressed: Vec<bool, 32>,
        a_released: Vec<bool, 32>,
        all_released: Vec<bool, 32>,
        setups: usize,
    }

    impl ControllerApp for Recorder {
        fn on_command(&mut self, cmd: &mut CommandContext<'_>) {
            let mut name = String::new();
            name.push_str(cmd.name()).unwrap();
            self.names.push(name).unwrap();
            self.a_pressed.push(cmd.is_key("a", KeyState::Pressed)).unwrap();
            self.a_released.push(cmd.is_key("a", KeyState::Released)).unwrap();
            self.all_released.push(cmd.all_keys_released()).unwrap();
        }

        fn on_setup(&mut self, setup: &mut SetupWriter<'_>) {
            self.setups += 1;
            setup.set_button("a", KeyVisibility::Visible, Some(KeyColor::Green), Some("Jump"));
        }
    }

    impl Recorder {
        fn names(&self) -> Vec<&str, 32> {
            self.names.iter().map(|n| n.as_str()).collect()
        }
    }

    fn feed(router: &mut CommandRouter, lines: &[&str]) {
        for line in lines {
            router.receive_line(line).unwrap();
        }
    }

    #[test]
    fn test_drain_in_arrival_order() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["a=1", "sr=10", "b=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 3);
        assert_eq!(app.names(), ["a", "sr", "b"]);
        assert!(router.pending().is_empty());
        assert_eq!(router.current().unwrap().name.as_str(), "b");
    }

    #[test]
    fn test_overwrite_before_drain_keeps_position() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["sr=1", "a=1", "sr=2"]);
        assert_eq!(router.drain(&mut app, &mut sink), 2);
        assert_eq!(app.names(), ["sr", "a"]);
        assert_eq!(router.axes().get(AxisCode::SliderRight), 2.0);
    }

    #[test]
    fn test_press_then_release() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["a=1", "!a=0"]);
        router.drain(&mut app, &mut sink);

        assert!(!router.pressed_keys().contains("a"));
        assert_eq!(app.a_pressed, [true, false]);
        assert_eq!(app.a_released, [false, true]);
    }

    #[test]
    fn test_release_only_transient() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["!a=0", "b=1"]);
        router.drain(&mut app, &mut sink);
        assert_eq!(app.a_released, [true, false]);
    }

    #[test]
    fn test_none_sentinel() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["a=1", "none=0"]);
        router.drain(&mut app, &mut sink);
        assert_eq!(app.all_released, [false, true]);
        // The sentinel does not clear the pressed set by itself
        assert!(router.pressed_keys().contains("a"));
    }

    #[test]
    fn test_config_names_skip_key_tracking() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["vc;x=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 1);
        assert!(router.pressed_keys().is_empty());
    }

    #[test]
    fn test_axis_cache_updates() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();

        feed(&mut router, &["sr=42.5"]);
        router.drain_with(&mut sink, |_| {});
        assert_eq!(router.axes().get(AxisCode::SliderRight), 42.5);
        assert_eq!(router.axes().get(AxisCode::SliderLeft), 0.0);

        feed(&mut router, &["jrx=0.3"]);
        let mut seen = 0.0;
        router.drain_with(&mut sink, |cmd| {
            seen = cmd.joystick_value(InputSide::Right, mycontroller_protocol::JoystickAxis::X);
        });
        assert_eq!(seen, 0.3);
        assert_eq!(router.axes().get(AxisCode::SliderRight), 42.5);
        assert_eq!(router.axes().get(AxisCode::JoystickRightY), 0.0);
    }

    #[test]
    fn test_toggle_count_across_drains() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut counts: Vec<u32, 8> = Vec::new();

        for _ in 0..6 {
            feed(&mut router, &["b=1"]);
            router.drain_with(&mut sink, |cmd| {
                counts.push(cmd.button_toggle_count(2)).unwrap();
            });
        }
        assert_eq!(counts, [1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_handshake_with_confirmation() {
        let mut router = CommandRouter::new();
        router.register_setup(SetupConfirmation::Required);
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["-v=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 0);
        assert_eq!(app.setups, 0);
        assert_eq!(sink.lines(), ["vc;hasSettings;1;"]);
        assert_eq!(router.setup_phase(), HandshakePhase::AwaitingQuery);

        sink.clear();
        feed(&mut router, &["getSettings"]);
        assert_eq!(router.drain(&mut app, &mut sink), 0);
        assert_eq!(app.setups, 1);
        assert_eq!(
            sink.lines(),
            ["vc;loader;1;", "vc;b;a;1;1;Jump", "vc;loader;0;"]
        );
        assert!(app.names.is_empty());
        assert!(router.pressed_keys().is_empty());
    }

    #[test]
    fn test_handshake_without_confirmation() {
        let mut router = CommandRouter::new();
        router.register_setup(SetupConfirmation::NotRequired);
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["-v=1", "getSettings=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 1);
        assert_eq!(app.setups, 1);
        assert_eq!(sink.lines()[0], "vc;loader;1;");
        // Not a trigger in this mode, so the app sees it
        assert_eq!(app.names(), ["getSettings"]);
    }

    #[test]
    fn test_handshake_names_are_plain_without_registration() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["-v=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 1);
        assert!(sink.lines().is_empty());
        assert!(router.pressed_keys().contains("-v"));
    }

    #[test]
    fn test_setup_without_buttons_sends_empty_burst() {
        let mut router = CommandRouter::new();
        router.register_setup(SetupConfirmation::NotRequired);
        let mut sink = RecordingSink::new();

        feed(&mut router, &["-v=1"]);
        router.drain_with(&mut sink, |_| {});
        assert_eq!(sink.lines(), ["vc;loader;1;", "vc;loader;0;"]);
    }

    #[test]
    fn test_connect_resets_only_pressed_keys() {
        let mut router = CommandRouter::new();
        router.register_setup(SetupConfirmation::Required);
        let mut sink = RecordingSink::new();

        feed(&mut router, &["a=1", "sl=5"]);
        router.drain_with(&mut sink, |cmd| {
            cmd.button_toggled();
        });
        assert!(router.pressed_keys().contains("a"));

        router.on_connected();
        assert!(router.pressed_keys().is_empty());
        assert_eq!(router.axes().get(AxisCode::SliderLeft), 5.0);
        assert_eq!(router.toggles().get("a"), 1);
        assert_eq!(router.setup_mode(), Some(SetupConfirmation::Required));
    }

    #[test]
    fn test_unknown_names_reach_app() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();
        let mut value = 0.0;

        feed(&mut router, &["whatever=abc"]);
        let count = router.drain_with(&mut sink, |cmd| value = cmd.value());
        assert_eq!(count, 1);
        assert!(value.is_nan());
    }

    #[test]
    fn test_receive_line_errors() {
        let mut router = CommandRouter::new();
        let long = "abcdefghijklmnopqrstuvwxyz0123456789=1";
        assert_eq!(
            router.receive_line(long),
            Err(ReceiveError::Decode(DecodeError::NameTooLong))
        );
        assert!(router.pending().is_empty());
    }

    #[test]
    fn test_held_keys_tracked_after_axis_and_sentinel_names() {
        let mut router = CommandRouter::new();
        let mut sink = RecordingSink::new();

        for axis in AxisCode::ALL {
            router.receive_line(axis.code()).unwrap();
        }
        feed(&mut router, &["none=0"]);
        router.drain_with(&mut sink, |_| {});

        feed(&mut router, &["up=1", "down=1", "left=1", "right=1", "a=1", "b=1"]);
        let mut held: Vec<bool, 8> = Vec::new();
        router.drain_with(&mut sink, |cmd| {
            held.push(cmd.is_key(cmd.name(), KeyState::Pressed)).unwrap();
        });

        assert_eq!(held, [true; 6]);
        assert_eq!(router.untracked_keys(), 0);
    }

    #[test]
    fn test_unregister_setup_makes_triggers_plain() {
        let mut router = CommandRouter::new();
        router.register_setup(SetupConfirmation::Required);
        router.unregister_setup();
        let mut sink = RecordingSink::new();
        let mut app = Recorder::default();

        feed(&mut router, &["-v=1"]);
        assert_eq!(router.drain(&mut app, &mut sink), 1);
        assert_eq!(router.setup_mode(), None);
        assert!(sink.lines().is_empty());
        assert_eq!(app.names(), ["-v"]);
    }
}
