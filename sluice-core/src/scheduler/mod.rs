//! Drain scheduler
//!
//! Pure cadence: invokes the consumer once per fixed period and keeps the
//! running statistics. It owns no buffer data.

pub mod executor;
pub mod tick;

pub use executor::{DrainMode, DrainScheduler};
pub use tick::{TickRate, TickTracker, MAX_TICK_HZ, REFERENCE_TICK_HZ};
