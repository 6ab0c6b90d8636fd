//! My Controller firmware
//!
//! Bridges a phone controller app to an RP2040 board through a BLE UART
//! module (HM-10 class) wired to UART0:
//!
//! - GPIO0: UART0 TX to module RX
//! - GPIO1: UART0 RX from module TX
//! - GPIO2: module STATE pin (high while connected)
//! - GPIO25: onboard LED

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use mycontroller_core::config::ControllerConfig;

mod app;
mod channels;
mod config;
mod tasks;

/// Factory baud rate of HM-10 class modules
const BLE_BAUDRATE: u32 = 9600;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Configuration is shared by the router task and the app
static CONTROLLER_CONFIG: StaticCell<ControllerConfig> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("My Controller firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static ControllerConfig = CONTROLLER_CONFIG.init(config::load_config());

    // BLE module on UART0
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BLE_BAUDRATE;
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("BLE UART initialized at {} baud", BLE_BAUDRATE);

    let state = Input::new(p.PIN_2, Pull::Down);
    let led = Output::new(p.PIN_25, Level::Low);
    let app = app::DemoApp::new(led, config);

    spawner.spawn(unwrap!(tasks::uart_rx_task(rx)));
    spawner.spawn(unwrap!(tasks::uart_tx_task(tx)));
    spawner.spawn(unwrap!(tasks::link_task(state)));
    spawner.spawn(unwrap!(tasks::router_task(config, app)));

    info!("All tasks spawned, firmware running");
}
