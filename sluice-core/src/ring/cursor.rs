//! Write position and drain cursor
//!
//! The producer publishes a logical write count; the consumer keeps the
//! pair of positions it needs to work out what is new since its last drain.
//!
//! The logical count wraps at [`count_wrap`], the largest multiple of the
//! capacity that fits in 32 bits, so `count % N` stays the physical write
//! offset across the wrap for any capacity.

use portable_atomic::{AtomicU32, Ordering};

use super::span::{Span, Spans};

/// Largest supported capacity
pub const MAX_CAPACITY: usize = 1 << 31;

/// Modulus of the logical write count for capacity `N`
pub const fn count_wrap<const N: usize>() -> u64 {
    ((1u64 << 32) / N as u64) * N as u64
}

/// Physical offset of a logical count
pub const fn offset_of<const N: usize>(count: u32) -> usize {
    count as usize % N
}

/// Bytes written between two logical counts
pub const fn distance<const N: usize>(from: u32, to: u32) -> u32 {
    let wrap = count_wrap::<N>();
    ((to as u64 + wrap - from as u64 % wrap) % wrap) as u32
}

/// Logical count after writing `n` more bytes
pub const fn advance_count<const N: usize>(count: u32, n: usize) -> u32 {
    let wrap = count_wrap::<N>();
    ((count as u64 + n as u64 % wrap) % wrap) as u32
}

/// Producer write position shared with the consumer
///
/// Only the producer context advances it; only the consumer context reads
/// it. The count is a single atomic word, so the consumer never sees a torn
/// value.
#[derive(Debug)]
pub struct WritePosition<const N: usize> {
    count: AtomicU32,
}

impl<const N: usize> WritePosition<N> {
    const VALID: () = assert!(
        N > 0 && N <= MAX_CAPACITY,
        "capacity must be in 1..=2^31"
    );

    /// Create a position at count 0
    pub const fn new() -> Self {
        let () = Self::VALID;
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Current logical count
    ///
    /// Acquire pairs with the release in [`publish`](Self::publish): every
    /// byte counted is visible in the store.
    pub fn load(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Current physical write offset
    pub fn offset(&self) -> usize {
        offset_of::<N>(self.load())
    }

    /// Publish a new logical count (producer context only)
    pub fn publish(&self, count: u32) {
        self.count.store(count, Ordering::Release);
    }

    /// Advance the count by `n` bytes (producer context only)
    ///
    /// Single writer, so a plain load/store pair is enough and no
    /// read-modify-write is needed on cores without CAS.
    pub fn advance(&self, n: usize) {
        let current = self.count.load(Ordering::Relaxed);
        self.publish(advance_count::<N>(current, n));
    }
}

impl<const N: usize> Default for WritePosition<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a counted advance
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Advance {
    /// Spans to emit, in stream order
    pub spans: Spans,
    /// Bytes overwritten before they could be drained
    pub lost: u32,
}

impl Advance {
    /// Check if the producer lapped the consumer
    pub fn overflowed(&self) -> bool {
        self.lost > 0
    }
}

/// Consumer-owned cursor pair
///
/// `start` is the physical offset up to which the store has been drained.
/// `last_count` is the logical count drained up to. Both drains keep the
/// two fields in step: `start == last_count % N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainCursor<const N: usize> {
    start: usize,
    last_count: u32,
}

impl<const N: usize> DrainCursor<N> {
    /// Create a cursor at offset 0
    pub const fn new() -> Self {
        Self {
            start: 0,
            last_count: 0,
        }
    }

    /// Create a cursor resuming from a known offset
    pub const fn at(start: usize) -> Self {
        let start = start % N;
        Self {
            start,
            last_count: start as u32,
        }
    }

    /// Create a cursor that treats everything up to `count` as drained
    pub const fn from_count(count: u32) -> Self {
        Self {
            start: offset_of::<N>(count),
            last_count: count,
        }
    }

    /// Offset drained up to
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Logical count drained up to
    pub const fn last_count(&self) -> u32 {
        self.last_count
    }

    /// Offset-pair drain
    ///
    /// Given the producer's current physical offset, returns the unread
    /// region `[start, current_end)` read circularly, and moves `start` to
    /// `current_end`.
    ///
    /// Only the two offsets are compared, so a full lap (`N` bytes since the
    /// last drain) reads as "nothing new", and more than a lap aliases to a
    /// shorter span. [`advance_to_count`](Self::advance_to_count) does not
    /// have this blind spot.
    pub fn advance_to(&mut self, current_end: usize) -> Spans {
        let end = current_end % N;
        let start = self.start;

        if start == end {
            return Spans::new();
        }

        self.start = end;

        let spans = if start < end {
            Spans::single(Span::new(start, end - start))
        } else {
            Spans::wrapped(Span::new(start, N - start), Span::new(0, end))
        };

        self.last_count = advance_count::<N>(self.last_count, spans.total_len());
        spans
    }

    /// Counted drain
    ///
    /// Works from the producer's logical count, so it knows exactly how many
    /// bytes were written since the last drain. When that exceeds `N` the
    /// oldest bytes are gone: the excess is reported as `lost` and the spans
    /// cover the newest `N` bytes, oldest first.
    pub fn advance_to_count(&mut self, current_count: u32) -> Advance {
        let written = distance::<N>(self.last_count, current_count) as usize;
        let end = offset_of::<N>(current_count);

        self.last_count = current_count;
        self.start = end;

        if written == 0 {
            return Advance::default();
        }

        let len = written.min(N);
        let lost = (written - len) as u32;
        let from = (end + N - len) % N;

        let spans = if from + len <= N {
            Spans::single(Span::new(from, len))
        } else {
            Spans::wrapped(Span::new(from, N - from), Span::new(0, len - (N - from)))
        };

        Advance { spans, lost }
    }
}
