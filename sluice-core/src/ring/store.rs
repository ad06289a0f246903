//! Circular byte storage
//!
//! Fixed-capacity storage addressed modulo its size. The store has no read
//! or write position of its own: the producer writes at offsets derived from
//! its write count, the consumer reads at offsets it computes from its
//! cursor. Every cell is an atomic byte, so a producer writing one offset
//! while the consumer reads another needs no lock.

use portable_atomic::{AtomicU8, Ordering};

use super::span::Span;

/// Fixed-capacity circular byte store
///
/// Index range is `[0, N)`. Offsets passed in are reduced modulo `N`, so
/// no access can land outside the backing array.
pub struct CircularStore<const N: usize> {
    cells: [AtomicU8; N],
}

impl<const N: usize> CircularStore<N> {
    const NON_EMPTY: () = assert!(N > 0, "circular store capacity must be non-zero");

    /// Create a zeroed store
    ///
    /// `const` so the store can live in a `static`.
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            cells: [const { AtomicU8::new(0) }; N],
        }
    }

    /// Store capacity in bytes
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Write one byte at `offset` (mod N)
    ///
    /// Relaxed: publication to the consumer happens through the write
    /// position's release store.
    pub fn write(&self, offset: usize, byte: u8) {
        self.cells[offset % N].store(byte, Ordering::Relaxed);
    }

    /// Read one byte at `offset` (mod N)
    pub fn read(&self, offset: usize) -> u8 {
        self.cells[offset % N].load(Ordering::Relaxed)
    }

    /// Copy the bytes of `span` into `out`
    ///
    /// Copies at most `out.len()` bytes and never past the capacity
    /// boundary. Returns the number of bytes copied.
    pub fn copy_span(&self, span: Span, out: &mut [u8]) -> usize {
        let start = span.offset % N;
        let len = span.len.min(N - start).min(out.len());

        for (dst, cell) in out[..len].iter_mut().zip(&self.cells[start..start + len]) {
            *dst = cell.load(Ordering::Relaxed);
        }

        len
    }
}

impl<const N: usize> Default for CircularStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for CircularStore<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CircularStore")
            .field("capacity", &N)
            .finish_non_exhaustive()
    }
}
