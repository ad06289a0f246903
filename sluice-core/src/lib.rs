//! Board-agnostic core logic for the ring buffer drain firmware
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Circular store with its single producer and single consumer handles
//! - Offset-pair and counted drain algorithms
//! - Drain scheduler (periodic cadence, late-tick accounting)
//! - Sink trait and backpressure policy
//! - Drain statistics
//! - Configuration types and ring sizing validation

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod ring;
pub mod scheduler;
pub mod stats;
pub mod traits;

pub use ring::{Consumer, Producer, Ring, Span, Spans};
pub use scheduler::{DrainMode, DrainScheduler, TickRate};
pub use stats::{DrainReport, DrainStats};
pub use traits::{Sink, SinkPolicy};
