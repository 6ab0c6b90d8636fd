//! Configuration type definitions
//!
//! These types describe the button layout sent to the app during setup and
//! how often the router drains pending commands.

use heapless::{String, Vec};

use mycontroller_protocol::{KeyColor, KeyVisibility, MAX_NAME_LEN};

use crate::setup::{SetupConfirmation, SetupWriter};

/// Maximum button label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum configured buttons
pub const MAX_BUTTONS: usize = 16;

/// Default drain interval in milliseconds
pub const DEFAULT_TICK_MS: u16 = 20;

/// One button in the app layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Key code the app sends for this button
    pub code: String<MAX_NAME_LEN>,
    /// Shown or hidden
    pub visibility: KeyVisibility,
    /// Color, app default if None
    pub color: Option<KeyColor>,
    /// Label, app default if None
    pub label: Option<String<MAX_LABEL_LEN>>,
}

impl ButtonConfig {
    /// Send this button to the app
    pub fn write(&self, setup: &mut SetupWriter<'_>) {
        setup.set_button(
            &self.code,
            self.visibility,
            self.color,
            self.label.as_deref(),
        );
    }
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Setup handshake mode, handshake disabled if None
    pub setup: Option<SetupConfirmation>,
    /// Drain interval in milliseconds
    pub tick_ms: u16,
    /// Button layout in send order
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            setup: None,
            tick_ms: DEFAULT_TICK_MS,
            buttons: Vec::new(),
        }
    }
}

impl ControllerConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a button by code
    pub fn find_button(&self, code: &str) -> Option<&ButtonConfig> {
        self.buttons.iter().find(|b| b.code.as_str() == code)
    }

    /// Send every configured button to the app
    pub fn write_buttons(&self, setup: &mut SetupWriter<'_>) {
        for button in &self.buttons {
            button.write(setup);
        }
    }
}
