//! Example controller application
//!
//! Lights the onboard LED while button `a` is held, toggles a fire mode on
//! `b` and logs analog inputs.

use defmt::*;
use embassy_rp::gpio::Output;

use mycontroller_core::config::ControllerConfig;
use mycontroller_core::{CommandContext, ControllerApp, SetupWriter};
use mycontroller_protocol::{InputSide, JoystickAxis, KeyCode, KeyState, OrientationAxis};

/// Modes cycled by the space key
const SPEED_STEPS: u32 = 3;

pub struct DemoApp {
    led: Output<'static>,
    config: &'static ControllerConfig,
}

impl DemoApp {
    pub fn new(led: Output<'static>, config: &'static ControllerConfig) -> Self {
        Self { led, config }
    }
}

impl ControllerApp for DemoApp {
    fn on_command(&mut self, cmd: &mut CommandContext<'_>) {
        trace!("Command {:?}", cmd.command());

        if cmd.all_keys_released() {
            self.led.set_low();
            return;
        }

        if cmd.is_key("a", KeyState::Pressed) {
            self.led.set_high();
        } else if cmd.is_key("a", KeyState::Released) {
            self.led.set_low();
        }

        if cmd.name() == "b" {
            let on = cmd.button_toggled();
            info!("Fire mode {}", if on { "on" } else { "off" });
        }

        if cmd.name() == KeyCode::Space.label() {
            let speed = cmd.button_toggle_count(SPEED_STEPS);
            info!("Speed {}", speed);
        }

        if cmd.is_special_key(KeyCode::Enter, KeyState::Released) {
            info!("Enter released");
        }

        if cmd.is_slider(InputSide::Right) {
            debug!("Slider right {}", cmd.slider_value(InputSide::Right));
        }

        if cmd.is_joystick(InputSide::Left, JoystickAxis::X)
            || cmd.is_joystick(InputSide::Left, JoystickAxis::Y)
        {
            debug!(
                "Joystick left {} {}",
                cmd.joystick_value(InputSide::Left, JoystickAxis::X),
                cmd.joystick_value(InputSide::Left, JoystickAxis::Y)
            );
        }

        if cmd.is_orientation(OrientationAxis::Compass) {
            debug!("Heading {}", cmd.orientation_value(OrientationAxis::Compass));
        }
    }

    fn on_setup(&mut self, setup: &mut SetupWriter<'_>) {
        self.config.write_buttons(setup);
        info!(
            "Sent layout: {} buttons, {} dropped",
            setup.written(),
            setup.dropped()
        );
    }
}
