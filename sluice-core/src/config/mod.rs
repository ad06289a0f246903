//! Configuration types
//!
//! Board-agnostic drain configuration, validated before the firmware is
//! built so the ring capacity can be a compile-time constant.

pub mod serial;
pub mod types;

pub use serial::*;
pub use types::*;
