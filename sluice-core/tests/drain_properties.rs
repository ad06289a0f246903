//! Property tests for the drain algorithms

use core::convert::Infallible;

use proptest::prelude::*;
use sluice_core::ring::Ring;
use sluice_core::{Sink, SinkPolicy};

const N: usize = 64;

#[derive(Default)]
struct Collect(Vec<u8>);

impl Sink for Collect {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Infallible> {
        self.0.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

/// Rounds of producer bursts; each round is followed by one drain.
/// At most 3 bursts of 15 bytes keeps every round under N.
fn rounds_below_capacity() -> impl Strategy<Value = Vec<Vec<Vec<u8>>>> {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..4),
        1..24,
    )
}

proptest! {
    #[test]
    fn counted_drain_emits_every_byte_once_in_order(rounds in rounds_below_capacity()) {
        let ring = Ring::<N>::new();
        let (mut producer, mut consumer) = ring.split().unwrap();
        let mut sink = Collect::default();
        let mut expected = Vec::new();

        for round in &rounds {
            let start = producer.offset();
            let mut written = 0;
            for burst in round {
                producer.write(burst);
                expected.extend_from_slice(burst);
                written += burst.len();
            }

            let report = consumer.drain_latest(&mut sink, SinkPolicy::Drop);

            prop_assert_eq!(report.emitted as usize, written);
            prop_assert_eq!(report.lost, 0);
            prop_assert!(report.spans <= 2);
            // Split exactly when the round runs past the capacity boundary
            prop_assert_eq!(report.spans == 2, start + written > N);
        }

        prop_assert_eq!(sink.0, expected);
    }

    #[test]
    fn offset_pair_drain_matches_below_capacity(rounds in rounds_below_capacity()) {
        let ring = Ring::<N>::new();
        let (mut producer, mut consumer) = ring.split().unwrap();
        let mut sink = Collect::default();
        let mut expected = Vec::new();

        for round in &rounds {
            let mut written = 0;
            for burst in round {
                producer.write(burst);
                expected.extend_from_slice(burst);
                written += burst.len();
            }

            let end = consumer.current_offset();
            let report = consumer.drain(end, &mut sink, SinkPolicy::Drop);

            prop_assert_eq!(report.emitted as usize, written);
            prop_assert_eq!(report.is_idle(), written == 0);
        }

        prop_assert_eq!(sink.0, expected);
    }

    #[test]
    fn overflow_never_emits_more_than_capacity(
        data in prop::collection::vec(any::<u8>(), 0..(4 * N)),
        split in 0usize..(4 * N),
    ) {
        let ring = Ring::<N>::new();
        let (mut producer, mut consumer) = ring.split().unwrap();

        // Two bursts before a single drain
        let split = split.min(data.len());
        producer.write(&data[..split]);
        producer.write(&data[split..]);

        let mut offset_sink = Collect::default();
        let end = consumer.current_offset();
        consumer.drain(end, &mut offset_sink, SinkPolicy::Drop);
        prop_assert!(offset_sink.0.len() <= N);

        // A fresh ring for the counted path, same writes
        let ring = Ring::<N>::new();
        let (mut producer, mut consumer) = ring.split().unwrap();
        producer.write(&data[..split]);
        producer.write(&data[split..]);

        let mut counted_sink = Collect::default();
        let report = consumer.drain_latest(&mut counted_sink, SinkPolicy::Drop);
        let kept = data.len().min(N);

        prop_assert_eq!(report.lost as usize, data.len() - kept);
        prop_assert_eq!(&counted_sink.0[..], &data[data.len() - kept..]);
    }
}
