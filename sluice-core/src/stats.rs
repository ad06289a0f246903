//! Drain reports and running statistics
//!
//! Every failure mode of the drain degrades to data loss. Nothing here is
//! fatal; the counters let the caller see the loss instead of assuming the
//! stream arrived intact.

/// Outcome of a single drain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    /// Spans handed to the sink (0, 1 or 2)
    pub spans: u8,
    /// Bytes the sink accepted
    pub emitted: u32,
    /// Bytes read from the store but refused by the sink
    pub dropped: u32,
    /// Bytes overwritten by the producer before this drain (counted mode only)
    pub lost: u32,
    /// Sink errors seen during this drain
    pub sink_errors: u32,
}

impl DrainReport {
    /// Check if the producer lapped the consumer
    pub fn overflowed(&self) -> bool {
        self.lost > 0
    }

    /// Check if the drain had nothing to do
    pub fn is_idle(&self) -> bool {
        self.spans == 0 && self.lost == 0
    }

    /// Check if any byte failed to reach the sink
    pub fn is_lossy(&self) -> bool {
        self.lost > 0 || self.dropped > 0
    }
}

/// Running drain statistics
///
/// All counters saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStats {
    /// Drains performed
    pub ticks: u32,
    /// Drains that found nothing new
    pub idle_ticks: u32,
    /// Bytes delivered to the sink
    pub bytes_emitted: u64,
    /// Bytes refused by the sink
    pub bytes_dropped: u64,
    /// Bytes overwritten before they were drained
    pub bytes_lost: u64,
    /// Drains that detected a producer lap
    pub overflows: u32,
    /// Drains split at the capacity boundary
    pub wrap_splits: u32,
    /// Sink errors
    pub sink_errors: u32,
    /// Tick periods skipped by the scheduler
    pub late_ticks: u32,
}

impl DrainStats {
    /// Create zeroed statistics
    pub const fn new() -> Self {
        Self {
            ticks: 0,
            idle_ticks: 0,
            bytes_emitted: 0,
            bytes_dropped: 0,
            bytes_lost: 0,
            overflows: 0,
            wrap_splits: 0,
            sink_errors: 0,
            late_ticks: 0,
        }
    }

    /// Fold a drain report into the totals
    pub fn record(&mut self, report: &DrainReport) {
        self.ticks = self.ticks.saturating_add(1);
        if report.is_idle() {
            self.idle_ticks = self.idle_ticks.saturating_add(1);
        }
        if report.spans >= 2 {
            self.wrap_splits = self.wrap_splits.saturating_add(1);
        }
        if report.overflowed() {
            self.overflows = self.overflows.saturating_add(1);
        }

        self.bytes_emitted = self.bytes_emitted.saturating_add(report.emitted as u64);
        self.bytes_dropped = self.bytes_dropped.saturating_add(report.dropped as u64);
        self.bytes_lost = self.bytes_lost.saturating_add(report.lost as u64);
        self.sink_errors = self.sink_errors.saturating_add(report.sink_errors);
    }

    /// Record skipped tick periods
    pub fn record_late(&mut self, skipped: u32) {
        self.late_ticks = self.late_ticks.saturating_add(skipped);
    }

    /// Check if any data has been lost or dropped so far
    pub fn is_lossy(&self) -> bool {
        self.bytes_lost > 0 || self.bytes_dropped > 0
    }
}
