//! Router task
//!
//! Owns the command router. Every tick it moves decoded commands into the
//! pending table and drains them through the application.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use mycontroller_core::config::ControllerConfig;
use mycontroller_core::CommandRouter;

use crate::app::DemoApp;
use crate::channels::{ChannelSink, COMMAND_CHANNEL, LINK_CONNECTED};

/// Router task - drains pending commands on a fixed interval
#[embassy_executor::task]
pub async fn router_task(config: &'static ControllerConfig, mut app: DemoApp) {
    info!("Router task started, tick {}ms", config.tick_ms);

    let mut router = CommandRouter::new();
    if let Some(mode) = config.setup {
        info!("Setup handshake registered: {:?}", mode);
        router.register_setup(mode);
    }

    let mut sink = ChannelSink;
    let mut ticker = Ticker::every(Duration::from_millis(config.tick_ms as u64));
    let mut untracked = 0;

    loop {
        match select(ticker.next(), LINK_CONNECTED.wait()).await {
            Either::First(()) => {
                while let Ok(command) = COMMAND_CHANNEL.try_receive() {
                    if let Err(e) = router.receive(command) {
                        warn!("Dropping command: {:?}", e);
                    }
                }

                let dispatched = router.drain(&mut app, &mut sink);
                if dispatched > 0 {
                    trace!("Drained {} commands", dispatched);
                }

                if router.untracked_keys() > untracked {
                    untracked = router.untracked_keys();
                    warn!("Pressed key set full, {} presses untracked", untracked);
                }
            }
            Either::Second(()) => {
                debug!("Connection reset, phase {:?}", router.setup_phase());
                router.on_connected();
            }
        }
    }
}
