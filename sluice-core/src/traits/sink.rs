//! Byte sink abstraction
//!
//! The sink is the downstream end of the drain, typically a transmitter.

use core::convert::Infallible;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered byte output
///
/// Implementations take as many bytes as they can without blocking
/// indefinitely and return how many they took. Bytes taken must be emitted
/// in the order offered, within one call and across calls.
pub trait Sink {
    /// Error type for write operations
    type Error;

    /// Offer bytes to the sink
    ///
    /// Returns the number of leading bytes accepted. `Ok(0)` means the sink
    /// is full right now.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Error = S::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(bytes)
    }
}

/// Buffer sink: takes bytes until the vector is full
impl<const C: usize> Sink for heapless::Vec<u8, C> {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        let take = bytes.len().min(C - self.len());
        match self.extend_from_slice(&bytes[..take]) {
            Ok(()) => Ok(take),
            Err(_) => Ok(0),
        }
    }
}

/// What to do when the sink stops accepting bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SinkPolicy {
    /// Drop whatever the sink refuses
    #[default]
    Drop,
    /// Re-offer up to this many times after the sink stalls, then drop
    Retry(u8),
}

impl SinkPolicy {
    /// Number of zero-progress writes tolerated before dropping
    pub const fn stall_budget(&self) -> u8 {
        match self {
            SinkPolicy::Drop => 0,
            SinkPolicy::Retry(n) => *n,
        }
    }
}

/// Outcome of offering one chunk to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Offered {
    /// Leading bytes the sink took
    pub accepted: usize,
    /// Sink reported an error
    pub failed: bool,
}

/// Offer `bytes` to `sink` under `policy`
///
/// Keeps writing while the sink makes progress. A zero-length write counts
/// against the policy's stall budget; an error ends the offer.
pub(crate) fn offer<S: Sink + ?Sized>(sink: &mut S, bytes: &[u8], policy: SinkPolicy) -> Offered {
    let budget = policy.stall_budget();
    let mut stalls = 0u8;
    let mut accepted = 0usize;

    while accepted < bytes.len() {
        match sink.write(&bytes[accepted..]) {
            Ok(0) => {
                if stalls >= budget {
                    break;
                }
                stalls += 1;
            }
            Ok(n) => accepted += n.min(bytes.len() - accepted),
            Err(_) => {
                return Offered {
                    accepted,
                    failed: true,
                }
            }
        }
    }

    Offered {
        accepted,
        failed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Sink that takes `per_call` bytes, then stalls for `stalls` calls
    struct Trickle {
        taken: Vec<u8, 32>,
        per_call: usize,
        stall_every: usize,
        calls: usize,
    }

    impl Sink for Trickle {
        type Error = ();

        fn write(&mut self, bytes: &[u8]) -> Result<usize, ()> {
            self.calls += 1;
            if self.stall_every != 0 && self.calls % self.stall_every == 0 {
                return Ok(0);
            }
            let n = bytes.len().min(self.per_call);
            self.taken.extend_from_slice(&bytes[..n]).map_err(|_| ())?;
            Ok(n)
        }
    }

    struct Broken;

    impl Sink for Broken {
        type Error = ();

        fn write(&mut self, _bytes: &[u8]) -> Result<usize, ()> {
            Err(())
        }
    }

    #[test]
    fn test_vec_sink_fills_up() {
        let mut sink: Vec<u8, 4> = Vec::new();
        assert_eq!(sink.write(b"abc").unwrap(), 3);
        assert_eq!(sink.write(b"def").unwrap(), 1);
        assert_eq!(sink.write(b"g").unwrap(), 0);
        assert_eq!(sink.as_slice(), b"abcd");
    }

    #[test]
    fn test_offer_follows_progress() {
        let mut sink = Trickle {
            taken: Vec::new(),
            per_call: 2,
            stall_every: 0,
            calls: 0,
        };
        let offered = offer(&mut sink, b"abcdefg", SinkPolicy::Drop);

        assert_eq!(offered.accepted, 7);
        assert!(!offered.failed);
        assert_eq!(sink.taken.as_slice(), b"abcdefg");
    }

    #[test]
    fn test_drop_gives_up_on_first_stall() {
        let mut sink = Trickle {
            taken: Vec::new(),
            per_call: 2,
            stall_every: 2,
            calls: 0,
        };
        let offered = offer(&mut sink, b"abcdef", SinkPolicy::Drop);

        assert_eq!(offered.accepted, 2);
        assert_eq!(sink.taken.as_slice(), b"ab");
    }

    #[test]
    fn test_retry_rides_out_stalls() {
        let mut sink = Trickle {
            taken: Vec::new(),
            per_call: 2,
            stall_every: 2,
            calls: 0,
        };
        let offered = offer(&mut sink, b"abcdef", SinkPolicy::Retry(3));

        assert_eq!(offered.accepted, 6);
        assert_eq!(sink.taken.as_slice(), b"abcdef");
    }

    #[test]
    fn test_retry_budget_is_bounded() {
        let mut sink: Vec<u8, 2> = Vec::new();
        let offered = offer(&mut sink, b"abcdef", SinkPolicy::Retry(5));

        assert_eq!(offered.accepted, 2);
        assert!(!offered.failed);
    }

    #[test]
    fn test_error_ends_offer() {
        let offered = offer(&mut Broken, b"abc", SinkPolicy::Retry(3));
        assert_eq!(offered.accepted, 0);
        assert!(offered.failed);
    }
}
