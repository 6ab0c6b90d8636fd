//! BLE UART transmit task
//!
//! Writes outbound lines to the app, each terminated by `\n`.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use mycontroller_protocol::line::LINE_END;

use crate::channels::OUTBOUND_CHANNEL;

/// UART TX task - sends queued lines to the app
#[embassy_executor::task]
pub async fn uart_tx_task(mut tx: BufferedUartTx) {
    info!("UART TX task started");

    loop {
        let line = OUTBOUND_CHANNEL.receive().await;

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send line: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(&[LINE_END]).await {
            warn!("Failed to send line end: {:?}", e);
            continue;
        }

        trace!("TX: {}", line.as_str());
    }
}
