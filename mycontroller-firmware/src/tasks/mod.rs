//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod link;
pub mod router;
pub mod uart_rx;
pub mod uart_tx;

pub use link::link_task;
pub use router::router_task;
pub use uart_rx::uart_rx_task;
pub use uart_tx::uart_tx_task;
