//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use mycontroller_core::LineSink;
use mycontroller_protocol::{Command, MessageLine};

/// Channel capacity for decoded commands
const COMMAND_CHANNEL_SIZE: usize = 16;

/// Channel capacity for outbound lines
///
/// Holds a full setup burst (loader markers plus every button).
const OUTBOUND_CHANNEL_SIZE: usize = 32;

/// Commands decoded from the BLE UART
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Lines waiting to be written to the BLE UART
pub static OUTBOUND_CHANNEL: Channel<CriticalSectionRawMutex, MessageLine, OUTBOUND_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the app connected
pub static LINK_CONNECTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Line sink that hands lines to the UART TX task
pub struct ChannelSink;

impl LineSink for ChannelSink {
    fn write_line(&mut self, line: &str) {
        let mut stored = MessageLine::new();
        if stored.push_str(line).is_err() {
            warn!("Outbound line too long, dropping");
            return;
        }
        // Drop rather than block the router task
        if OUTBOUND_CHANNEL.try_send(stored).is_err() {
            warn!("Outbound channel full, dropping line");
        }
    }
}
