//! Drain configuration and sizing validation
//!
//! Capacity and tick rate have to be chosen together: the ring must hold
//! everything the line can deliver between two drains. An undersized ring
//! is invisible at runtime (it just overwrites), so the check happens when
//! the configuration is validated.

use core::fmt;

use super::serial::SerialConfig;
use crate::ring::MAX_CAPACITY;
use crate::scheduler::{DrainMode, MAX_TICK_HZ, REFERENCE_TICK_HZ};
use crate::traits::SinkPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default ring capacity in bytes
pub const DEFAULT_CAPACITY: usize = 4096;

/// Default statistics log interval in seconds
pub const DEFAULT_STATS_INTERVAL_S: u16 = 10;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Ring capacity is zero
    ZeroCapacity,
    /// Ring capacity exceeds [`MAX_CAPACITY`]
    CapacityTooLarge,
    /// Tick rate is zero
    ZeroTickRate,
    /// Tick rate exceeds [`MAX_TICK_HZ`]
    TickRateTooHigh,
    /// Baud rate is zero
    ZeroBaudrate,
    /// Ring cannot hold one tick's worth of worst-case input
    CapacityTooSmall {
        /// Bytes the line can deliver between two ticks
        needed: u32,
        /// Configured capacity
        capacity: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => write!(f, "capacity must be non-zero"),
            ConfigError::CapacityTooLarge => {
                write!(f, "capacity must be at most {} bytes", MAX_CAPACITY)
            }
            ConfigError::ZeroTickRate => write!(f, "tick_hz must be non-zero"),
            ConfigError::TickRateTooHigh => write!(f, "tick_hz must be at most {}", MAX_TICK_HZ),
            ConfigError::ZeroBaudrate => write!(f, "serial.baudrate must be non-zero"),
            ConfigError::CapacityTooSmall { needed, capacity } => write!(
                f,
                "capacity {} is below the {} bytes the line can deliver per tick",
                capacity, needed
            ),
        }
    }
}

/// Complete drain configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrainConfig {
    /// Ring capacity in bytes
    pub capacity: usize,
    /// Drain rate in Hz
    pub tick_hz: u32,
    /// Producer position interpretation
    pub mode: DrainMode,
    /// Sink backpressure policy
    pub sink_policy: SinkPolicy,
    /// Statistics log interval in seconds (0 = off)
    pub stats_interval_s: u16,
    /// Print the startup banner
    pub banner: bool,
    /// Serial line feeding the ring
    pub serial: SerialConfig,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            tick_hz: REFERENCE_TICK_HZ,
            mode: DrainMode::default(),
            sink_policy: SinkPolicy::default(),
            stats_interval_s: DEFAULT_STATS_INTERVAL_S,
            banner: true,
            serial: SerialConfig::default(),
        }
    }
}

impl DrainConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Most bytes the line can deliver between two ticks
    pub fn worst_case_bytes_per_tick(&self) -> u32 {
        if self.tick_hz == 0 {
            return self.serial.bytes_per_second();
        }
        self.serial.bytes_per_second().div_ceil(self.tick_hz)
    }

    /// Headroom: how many ticks of worst-case input the ring can absorb
    pub fn capacity_ticks(&self) -> u32 {
        let per_tick = self.worst_case_bytes_per_tick().max(1) as usize;
        u32::try_from(self.capacity / per_tick).unwrap_or(u32::MAX)
    }

    /// Check the configuration for errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge);
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.tick_hz > MAX_TICK_HZ {
            return Err(ConfigError::TickRateTooHigh);
        }
        if self.serial.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        let needed = self.worst_case_bytes_per_tick();
        if needed as usize > self.capacity {
            return Err(ConfigError::CapacityTooSmall {
                needed,
                capacity: self.capacity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DrainConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.worst_case_bytes_per_tick(), 12);
        assert_eq!(config.capacity_ticks(), 341);
    }

    #[test]
    fn test_undersized_ring_rejected() {
        let config = DrainConfig {
            capacity: 64,
            tick_hz: 10,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::CapacityTooSmall {
                needed: 1152,
                capacity: 64
            })
        );
    }

    #[test]
    fn test_zero_values_rejected() {
        let zero_capacity = DrainConfig {
            capacity: 0,
            ..Default::default()
        };
        assert_eq!(zero_capacity.validate(), Err(ConfigError::ZeroCapacity));

        let zero_tick = DrainConfig {
            tick_hz: 0,
            ..Default::default()
        };
        assert_eq!(zero_tick.validate(), Err(ConfigError::ZeroTickRate));

        let mut zero_baud = DrainConfig::default();
        zero_baud.serial.baudrate = 0;
        assert_eq!(zero_baud.validate(), Err(ConfigError::ZeroBaudrate));
    }

    #[test]
    fn test_tick_rate_limit() {
        let config = DrainConfig {
            tick_hz: MAX_TICK_HZ + 1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TickRateTooHigh));
    }

    #[test]
    fn test_capacity_limit_is_inclusive() {
        let at_limit = DrainConfig {
            capacity: MAX_CAPACITY,
            ..Default::default()
        };
        assert_eq!(at_limit.validate(), Ok(()));

        let over_limit = DrainConfig {
            capacity: MAX_CAPACITY + 1,
            ..Default::default()
        };
        assert_eq!(over_limit.validate(), Err(ConfigError::CapacityTooLarge));
    }
}
