//! Shared state between tasks
//!
//! The ring is the only state shared by the producer and the drain; the
//! pipe and signal carry drained bytes and statistics onward.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embassy_sync::signal::Signal;

use sluice_core::{DrainStats, Ring};

use crate::config::RING_CAPACITY;

/// TX pipe capacity (drained bytes waiting for the UART)
pub const TX_PIPE_SIZE: usize = 512;

/// Ring buffer written by the RX task and drained by the drain task
pub static RING: Ring<RING_CAPACITY> = Ring::new();

/// Drained bytes queued for transmission
pub static TX_PIPE: Pipe<CriticalSectionRawMutex, TX_PIPE_SIZE> = Pipe::new();

/// Periodic statistics snapshot from the drain task
pub static STATS_SNAPSHOT: Signal<CriticalSectionRawMutex, DrainStats> = Signal::new();
