//! Circular store and its producer/consumer endpoints
//!
//! A [`Ring`] bundles the byte store and the shared write position into one
//! unit that can live in a `static`. [`Ring::split`] hands out exactly one
//! [`Producer`] and one [`Consumer`]; there is no other way to write the
//! store or advance the position.
//!
//! ```text
//!  producer context              consumer context (periodic)
//!  ────────────────              ───────────────────────────
//!  write bytes ──► CircularStore ◄── read spans ──► Sink
//!  publish count ─► WritePosition ◄── sample once per tick
//! ```

pub mod consumer;
pub mod cursor;
pub mod producer;
pub mod span;
pub mod store;

pub use consumer::{Consumer, DRAIN_CHUNK};
pub use cursor::{Advance, DrainCursor, WritePosition, MAX_CAPACITY};
pub use producer::Producer;
pub use span::{Span, Spans, MAX_SPANS};
pub use store::CircularStore;

use portable_atomic::{AtomicBool, Ordering};

/// Store, write position and split guard bundled together
pub struct Ring<const N: usize> {
    store: CircularStore<N>,
    position: WritePosition<N>,
    split: AtomicBool,
}

impl<const N: usize> Ring<N> {
    /// Create an empty ring
    pub const fn new() -> Self {
        Self {
            store: CircularStore::new(),
            position: WritePosition::new(),
            split: AtomicBool::new(false),
        }
    }

    /// Capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Take the producer and consumer handles
    ///
    /// Returns `None` if the ring has already been split.
    pub fn split(&self) -> Option<(Producer<'_, N>, Consumer<'_, N>)> {
        if self.split.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((Producer::new(self), Consumer::new(self)))
    }

    /// Logical count of bytes written so far
    pub fn write_count(&self) -> u32 {
        self.position.load()
    }

    pub(crate) fn store(&self) -> &CircularStore<N> {
        &self.store
    }

    pub(crate) fn position(&self) -> &WritePosition<N> {
        &self.position
    }
}

impl<const N: usize> Default for Ring<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for Ring<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &N)
            .field("write_count", &self.write_count())
            .finish()
    }
}
