//! BLE UART receive task
//!
//! Frames bytes from the BLE module into lines and decodes them into
//! commands for the router.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use mycontroller_protocol::{Command, LineParser};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// UART RX task - receives and decodes command lines from the app
#[embassy_executor::task]
pub async fn uart_rx_task(mut rx: BufferedUartRx) {
    info!("UART RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(line)) => handle_line(&line),
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Line framing error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Decode a line and queue it for the router
fn handle_line(line: &str) {
    match Command::decode(line) {
        Ok(command) => {
            debug!("Command: {}={}", command.name.as_str(), command.value);
            if COMMAND_CHANNEL.try_send(command).is_err() {
                warn!("Command channel full, dropping command");
            }
        }
        Err(e) => {
            warn!("Failed to decode command: {:?}", e);
        }
    }
}
