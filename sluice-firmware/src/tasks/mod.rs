//! Embassy async tasks
//!
//! Each task runs independently and communicates via the ring, the TX
//! pipe, or the stats signal.

pub mod drain;
pub mod rx;
pub mod stats;
pub mod tx;

pub use drain::drain_task;
pub use rx::rx_task;
pub use stats::stats_task;
pub use tx::tx_task;
