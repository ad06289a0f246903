//! Collaborator traits
//!
//! These traits define the interface between the drain logic and the
//! board-specific output path.

pub mod sink;

pub use sink::{Sink, SinkPolicy};
