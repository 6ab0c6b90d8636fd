//! Last reported value of every slider, joystick and orientation channel

use mycontroller_protocol::AxisCode;

/// Cached axis values, zero until first reported
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCache {
    values: [f32; AxisCode::COUNT],
}

impl Default for AxisCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisCache {
    /// Create a cache with every channel at zero
    pub const fn new() -> Self {
        Self {
            values: [0.0; AxisCode::COUNT],
        }
    }

    /// Store `value` if `name` is an axis code
    ///
    /// Returns the channel that was updated.
    pub fn update(&mut self, name: &str, value: f32) -> Option<AxisCode> {
        let axis = AxisCode::from_name(name)?;
        self.values[axis.index()] = value;
        Some(axis)
    }

    /// Last value of a channel
    pub fn get(&self, axis: AxisCode) -> f32 {
        self.values[axis.index()]
    }
}
