//! Periodic drain executor
//!
//! Owns the consumer, the sink and the statistics. Each tick samples the
//! producer position once and drains synchronously; `&mut self` rules out
//! overlapping drains.

use super::tick::{TickRate, TickTracker};
use crate::ring::Consumer;
use crate::stats::{DrainReport, DrainStats};
use crate::traits::{Sink, SinkPolicy};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the scheduler interprets the producer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrainMode {
    /// Logical write count: detects and reports overflow
    #[default]
    Counted,
    /// Physical offset pair only: a full lap reads as idle
    OffsetPair,
}

/// Periodic drain scheduler
#[derive(Debug)]
pub struct DrainScheduler<'a, const N: usize, S: Sink> {
    consumer: Consumer<'a, N>,
    sink: S,
    policy: SinkPolicy,
    mode: DrainMode,
    rate: TickRate,
    tracker: TickTracker,
    stats: DrainStats,
}

impl<'a, const N: usize, S: Sink> DrainScheduler<'a, N, S> {
    /// Create a scheduler with the default policy and mode
    pub fn new(consumer: Consumer<'a, N>, sink: S, rate: TickRate) -> Self {
        Self {
            consumer,
            sink,
            policy: SinkPolicy::default(),
            mode: DrainMode::default(),
            rate,
            tracker: TickTracker::new(rate),
            stats: DrainStats::new(),
        }
    }

    /// Set the sink backpressure policy
    pub fn with_policy(mut self, policy: SinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the drain mode
    pub fn with_mode(mut self, mode: DrainMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run one drain
    ///
    /// Call once per period; `now_us` is a monotonic timestamp used only
    /// for late-tick accounting.
    pub fn on_tick(&mut self, now_us: u64) -> DrainReport {
        let skipped = self.tracker.observe(now_us);

        let report = match self.mode {
            DrainMode::Counted => self.consumer.drain_latest(&mut self.sink, self.policy),
            DrainMode::OffsetPair => {
                let end = self.consumer.current_offset();
                self.consumer.drain(end, &mut self.sink, self.policy)
            }
        };

        self.stats.record(&report);
        self.stats.record_late(skipped);
        report
    }

    /// Statistics since start or the last reset
    pub fn stats(&self) -> &DrainStats {
        &self.stats
    }

    /// Zero the statistics
    pub fn reset_stats(&mut self) {
        self.stats = DrainStats::new();
    }

    /// Drain mode
    pub fn mode(&self) -> DrainMode {
        self.mode
    }

    /// Sink policy
    pub fn policy(&self) -> SinkPolicy {
        self.policy
    }

    /// Tick rate
    pub fn rate(&self) -> TickRate {
        self.rate
    }

    /// Underlying consumer
    pub fn consumer(&self) -> &Consumer<'a, N> {
        &self.consumer
    }

    /// Sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
