//! Tick cadence and late-tick detection

/// Reference drain rate
pub const REFERENCE_TICK_HZ: u32 = 1000;

/// Highest supported drain rate
pub const MAX_TICK_HZ: u32 = 100_000;

/// Fixed drain rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickRate {
    hz: u32,
}

impl TickRate {
    /// Create a tick rate, clamped to `1..=MAX_TICK_HZ`
    pub const fn from_hz(hz: u32) -> Self {
        let hz = if hz == 0 {
            1
        } else if hz > MAX_TICK_HZ {
            MAX_TICK_HZ
        } else {
            hz
        };
        Self { hz }
    }

    /// Ticks per second
    pub const fn hz(&self) -> u32 {
        self.hz
    }

    /// Tick period in microseconds
    pub const fn period_us(&self) -> u64 {
        1_000_000 / self.hz as u64
    }
}

impl Default for TickRate {
    fn default() -> Self {
        Self::from_hz(REFERENCE_TICK_HZ)
    }
}

/// Tracks tick timestamps to spot skipped periods
///
/// A gap longer than one and a half periods means at least one tick was
/// missed; the gap rounded to whole periods, minus the tick that did
/// arrive, is the number skipped.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTracker {
    period_us: u64,
    last_us: Option<u64>,
}

impl TickTracker {
    /// Create a tracker for the given rate
    pub const fn new(rate: TickRate) -> Self {
        Self {
            period_us: rate.period_us(),
            last_us: None,
        }
    }

    /// Record a tick at `now_us`, returning the number of skipped periods
    pub fn observe(&mut self, now_us: u64) -> u32 {
        let skipped = match self.last_us {
            Some(last) => {
                let gap = now_us.saturating_sub(last);
                let half = self.period_us / 2;
                if self.period_us > 0 && gap > self.period_us + half {
                    ((gap + half) / self.period_us).saturating_sub(1)
                } else {
                    0
                }
            }
            None => 0,
        };

        self.last_us = Some(now_us);
        u32::try_from(skipped).unwrap_or(u32::MAX)
    }
}
