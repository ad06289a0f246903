//! Producer endpoint
//!
//! Software stand-in for a DMA channel: writes bytes at increasing offsets,
//! wrapping at the capacity, then publishes the new write count. It never
//! waits for the consumer.

use super::cursor::{advance_count, offset_of};
use super::Ring;

/// Write handle for a [`Ring`]
///
/// Only one exists per ring, so the write count it mirrors is the single
/// source of truth for the shared position.
#[derive(Debug)]
pub struct Producer<'a, const N: usize> {
    ring: &'a Ring<N>,
    count: u32,
}

impl<'a, const N: usize> Producer<'a, N> {
    pub(crate) fn new(ring: &'a Ring<N>) -> Self {
        Self {
            ring,
            count: ring.position().load(),
        }
    }

    /// Write bytes into the store and publish them
    ///
    /// Overwrites undrained bytes if the consumer has fallen behind. When
    /// `bytes` is longer than the store only its last `N` bytes are kept,
    /// but the count still advances by the full length. Returns the number
    /// of bytes placed in the store.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        if bytes.is_empty() {
            return 0;
        }

        let skip = bytes.len().saturating_sub(N);
        let mut offset = (offset_of::<N>(self.count) + skip % N) % N;

        for &byte in &bytes[skip..] {
            self.ring.store().write(offset, byte);
            offset += 1;
            if offset == N {
                offset = 0;
            }
        }

        self.count = advance_count::<N>(self.count, bytes.len());
        self.ring.position().publish(self.count);
        bytes.len() - skip
    }

    /// Write a single byte
    pub fn write_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }

    /// Logical count of bytes written
    pub fn position(&self) -> u32 {
        self.count
    }

    /// Physical offset the next byte lands at
    pub fn offset(&self) -> usize {
        offset_of::<N>(self.count)
    }
}
