//! BLE link state task
//!
//! The BLE module drives its STATE pin high while a central is connected.
//! Each rising edge is a new app connection.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::LINK_CONNECTED;

/// Link task - watches the module STATE pin
#[embassy_executor::task]
pub async fn link_task(mut state: Input<'static>) {
    info!("Link task started");

    // Already connected at boot
    if state.is_high() {
        info!("App connected");
        LINK_CONNECTED.signal(());
    }

    loop {
        state.wait_for_rising_edge().await;
        info!("App connected");
        LINK_CONNECTED.signal(());

        state.wait_for_falling_edge().await;
        info!("App disconnected");
    }
}
