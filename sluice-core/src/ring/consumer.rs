//! Consumer endpoint and drain
//!
//! Works out the unread span(s) from the cursor pair and hands their bytes
//! to a sink before returning. Bytes are copied out of the store in
//! [`DRAIN_CHUNK`]-sized pieces, so the sink only ever sees owned copies and
//! nothing refers into the store once the drain is over.

use super::cursor::{distance, DrainCursor};
use super::span::{Span, Spans};
use super::Ring;
use crate::stats::DrainReport;
use crate::traits::sink::{offer, Sink, SinkPolicy};

/// Bytes copied out of the store per sink write
pub const DRAIN_CHUNK: usize = 64;

/// Read handle for a [`Ring`]
///
/// Owns the cursor pair; only one exists per ring.
#[derive(Debug)]
pub struct Consumer<'a, const N: usize> {
    ring: &'a Ring<N>,
    cursor: DrainCursor<N>,
}

impl<'a, const N: usize> Consumer<'a, N> {
    pub(crate) fn new(ring: &'a Ring<N>) -> Self {
        // Anything published before the split counts as drained
        let cursor = DrainCursor::from_count(ring.position().load());
        Self { ring, cursor }
    }

    /// Current cursor pair
    pub fn cursor(&self) -> &DrainCursor<N> {
        &self.cursor
    }

    /// Producer's current logical count (one atomic sample)
    pub fn current_count(&self) -> u32 {
        self.ring.position().load()
    }

    /// Producer's current physical offset (one atomic sample)
    pub fn current_offset(&self) -> usize {
        self.ring.position().offset()
    }

    /// Bytes waiting to be drained, capped at the capacity
    pub fn pending(&self) -> usize {
        (distance::<N>(self.cursor.last_count(), self.current_count()) as usize).min(N)
    }

    /// Offset-pair drain up to `current_end`
    ///
    /// Emits `[start, current_end)`, or `[start, N)` then `[0, current_end)`
    /// when the producer has wrapped. Cannot tell a full lap from no
    /// activity; see [`DrainCursor::advance_to`].
    pub fn drain<S: Sink>(
        &mut self,
        current_end: usize,
        sink: &mut S,
        policy: SinkPolicy,
    ) -> DrainReport {
        let spans = self.cursor.advance_to(current_end);
        self.emit(&spans, 0, sink, policy)
    }

    /// Counted drain up to the producer's latest count
    ///
    /// Samples the shared position once. Detects and reports overflow; at
    /// most `N` bytes are ever emitted.
    pub fn drain_latest<S: Sink>(&mut self, sink: &mut S, policy: SinkPolicy) -> DrainReport {
        let count = self.current_count();
        let advance = self.cursor.advance_to_count(count);
        self.emit(&advance.spans, advance.lost, sink, policy)
    }

    fn emit<S: Sink>(
        &self,
        spans: &Spans,
        lost: u32,
        sink: &mut S,
        policy: SinkPolicy,
    ) -> DrainReport {
        let mut report = DrainReport {
            spans: spans.len() as u8,
            lost,
            ..Default::default()
        };

        for span in spans {
            self.emit_span(*span, sink, policy, &mut report);
        }

        report
    }

    fn emit_span<S: Sink>(
        &self,
        span: Span,
        sink: &mut S,
        policy: SinkPolicy,
        report: &mut DrainReport,
    ) {
        let mut chunk = [0u8; DRAIN_CHUNK];
        let mut offset = span.offset;
        let end = span.end();

        while offset < end {
            let len = self
                .ring
                .store()
                .copy_span(Span::new(offset, end - offset), &mut chunk);
            let offered = offer(sink, &chunk[..len], policy);

            report.emitted += offered.accepted as u32;

            if offered.failed {
                // Rest of the span is abandoned
                report.dropped += (end - offset - offered.accepted) as u32;
                report.sink_errors += 1;
                return;
            }

            report.dropped += (len - offered.accepted) as u32;
            offset += len;
        }
    }
}
