//! Queries available while handling a drained command

use mycontroller_protocol::command::{ALL_RELEASED, RELEASE_PREFIX};
use mycontroller_protocol::{
    AxisCode, Command, InputSide, JoystickAxis, KeyCode, KeyState, OrientationAxis,
};

use super::axes::AxisCache;
use super::keys::{PressedKeys, ToggleStates};

/// View of the router state for one drained command
///
/// Change queries (`is_slider`, `is_key(.., Released)`, ...) describe the
/// command being handled. Value queries read state that outlives it.
pub struct CommandContext<'a> {
    command: &'a Command,
    pressed: &'a PressedKeys,
    axes: &'a AxisCache,
    toggles: &'a mut ToggleStates,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        command: &'a Command,
        pressed: &'a PressedKeys,
        axes: &'a AxisCache,
        toggles: &'a mut ToggleStates,
    ) -> Self {
        Self {
            command,
            pressed,
            axes,
            toggles,
        }
    }

    /// Name of the command being handled
    pub fn name(&self) -> &str {
        &self.command.name
    }

    /// Value of the command being handled (NaN if not numeric)
    pub fn value(&self) -> f32 {
        self.command.value
    }

    /// The command being handled
    pub fn command(&self) -> &Command {
        self.command
    }

    /// Check a key against a state
    ///
    /// `code` is compared in lowercase. Pressed means the key is held down;
    /// released is only true while handling the release command itself.
    pub fn is_key(&self, code: &str, state: KeyState) -> bool {
        match state {
            KeyState::Pressed => self.pressed.any(|key| eq_lowercased(key, code)),
            KeyState::Released => self
                .command
                .name
                .strip_prefix(RELEASE_PREFIX)
                .is_some_and(|key| eq_lowercased(key, code)),
        }
    }

    /// Check one of the app's special keys against a state
    pub fn is_special_key(&self, key: KeyCode, state: KeyState) -> bool {
        self.is_key(key.label(), state)
    }

    /// Check if the app reported that every key was released
    pub fn all_keys_released(&self) -> bool {
        self.command.name.as_str() == ALL_RELEASED
    }

    /// Check if this command is a slider change
    pub fn is_slider(&self, side: InputSide) -> bool {
        self.is_axis(AxisCode::slider(side))
    }

    /// Last value of a slider
    pub fn slider_value(&self, side: InputSide) -> f32 {
        self.axes.get(AxisCode::slider(side))
    }

    /// Check if this command is a joystick change
    pub fn is_joystick(&self, side: InputSide, axis: JoystickAxis) -> bool {
        self.is_axis(AxisCode::joystick(side, axis))
    }

    /// Last value of a joystick axis
    pub fn joystick_value(&self, side: InputSide, axis: JoystickAxis) -> f32 {
        self.axes.get(AxisCode::joystick(side, axis))
    }

    /// Check if this command is an orientation change
    pub fn is_orientation(&self, axis: OrientationAxis) -> bool {
        self.is_axis(AxisCode::orientation(axis))
    }

    /// Last value of an orientation channel
    pub fn orientation_value(&self, axis: OrientationAxis) -> f32 {
        self.axes.get(AxisCode::orientation(axis))
    }

    /// Flip the toggle state of this command's name and return it
    pub fn button_toggled(&mut self) -> bool {
        self.toggles.toggle(&self.command.name)
    }

    /// Advance this command's toggle counter, wrapping to zero after `max`
    pub fn button_toggle_count(&mut self, max: u32) -> u32 {
        self.toggles.count(&self.command.name, max)
    }

    fn is_axis(&self, axis: AxisCode) -> bool {
        self.command.name.as_str() == axis.code()
    }
}

/// Compare a stored key with a query code lowercased (ASCII only)
fn eq_lowercased(stored: &str, query: &str) -> bool {
    stored.len() == query.len()
        && stored
            .bytes()
            .zip(query.bytes())
            .all(|(s, q)| s == q.to_ascii_lowercase())
}
