//! Configuration loading
//!
//! The button layout is compiled into the firmware from `controller.toml`
//! and parsed at boot by the no_std parser in `mycontroller-core`.

use defmt::*;
use heapless::String;

use mycontroller_core::config::{parse_config, ButtonConfig, ControllerConfig};
use mycontroller_core::SetupConfirmation;
use mycontroller_protocol::{KeyColor, KeyVisibility};

/// Embedded configuration (compiled into firmware)
/// Edit controller.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../controller.toml");

/// Parse the embedded configuration, falling back to a minimal layout
pub fn load_config() -> ControllerConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Parsed embedded configuration: {} buttons, tick {}ms",
                config.buttons.len(),
                config.tick_ms
            );
            config
        }
        Err(e) => {
            // build.rs validates the file, so this only happens when the two
            // parsers disagree
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using minimal fallback configuration");
            fallback_config()
        }
    }
}

/// Single visible button with handshake confirmation
fn fallback_config() -> ControllerConfig {
    let mut config = ControllerConfig {
        setup: Some(SetupConfirmation::Required),
        ..Default::default()
    };

    let mut code = String::new();
    let _ = code.push('a');
    let button = ButtonConfig {
        code,
        visibility: KeyVisibility::Visible,
        color: Some(KeyColor::Green),
        label: None,
    };
    let _ = config.buttons.push(button);

    config
}
