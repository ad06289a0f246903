//! Drain scenarios: wrap, no wrap, full lap, repeated tick, overflow

use core::convert::Infallible;

use sluice_core::ring::{DrainCursor, Ring, Span};
use sluice_core::{DrainMode, DrainScheduler, Sink, SinkPolicy, TickRate};

/// Sink that keeps everything it is given
#[derive(Default)]
struct Collect(Vec<u8>);

impl Sink for Collect {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Infallible> {
        self.0.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

fn bytes(range: core::ops::Range<u8>) -> Vec<u8> {
    range.collect()
}

#[test]
fn wrapped_region_is_tail_then_head() {
    let mut cursor = DrainCursor::<8>::at(6);
    let spans = cursor.advance_to(2);

    assert_eq!(spans.as_slice(), &[Span::new(6, 2), Span::new(0, 2)]);
    assert_eq!(spans.total_len(), 4);
}

#[test]
fn unwrapped_region_is_one_span() {
    let mut cursor = DrainCursor::<8>::at(2);
    let spans = cursor.advance_to(6);

    assert_eq!(spans.as_slice(), &[Span::new(2, 4)]);
    assert_eq!(spans.total_len(), 4);
}

#[test]
fn no_new_data_leaves_start_in_place() {
    let mut cursor = DrainCursor::<8>::at(5);

    assert!(cursor.advance_to(5).is_empty());
    assert_eq!(cursor.start(), 5);
}

#[test]
fn repeated_tick_with_same_end_is_empty() {
    let mut cursor = DrainCursor::<8>::at(1);

    assert_eq!(cursor.advance_to(4).total_len(), 3);
    assert!(cursor.advance_to(4).is_empty());
}

#[test]
fn offset_pair_full_lap_reads_as_nothing_new() {
    // Known limitation: N bytes since the last drain put the write offset
    // back where it started, which the offset pair cannot tell from idle.
    let ring = Ring::<8>::new();
    let (mut producer, mut consumer) = ring.split().unwrap();
    let mut sink = Collect::default();

    producer.write(b"ab");
    let end = consumer.current_offset();
    consumer.drain(end, &mut sink, SinkPolicy::Drop);

    producer.write(b"cdefghij");
    let end = consumer.current_offset();
    let report = consumer.drain(end, &mut sink, SinkPolicy::Drop);

    assert!(report.is_idle());
    assert_eq!(report.lost, 0);
    assert_eq!(sink.0, b"ab");
}

#[test]
fn counted_full_lap_is_drained() {
    let ring = Ring::<8>::new();
    let (mut producer, mut consumer) = ring.split().unwrap();
    let mut sink = Collect::default();

    producer.write(b"ab");
    consumer.drain_latest(&mut sink, SinkPolicy::Drop);

    producer.write(b"cdefghij");
    let report = consumer.drain_latest(&mut sink, SinkPolicy::Drop);

    assert_eq!(report.emitted, 8);
    assert!(!report.overflowed());
    assert_eq!(sink.0, b"abcdefghij");
}

#[test]
fn overflow_offset_pair_is_bounded() {
    // N = 16, two bursts totalling 20 bytes before the first drain
    let ring = Ring::<16>::new();
    let (mut producer, mut consumer) = ring.split().unwrap();
    let mut sink = Collect::default();

    producer.write(&bytes(0..12));
    producer.write(&bytes(12..20));

    let end = consumer.current_offset();
    let report = consumer.drain(end, &mut sink, SinkPolicy::Drop);

    // Aliased to a 4-byte span: spurious, but never more than N
    assert_eq!(end, 4);
    assert_eq!(report.spans, 1);
    assert!(report.emitted as usize <= 16);
    assert_eq!(sink.0, bytes(16..20));
}

#[test]
fn overflow_counted_reports_loss() {
    let ring = Ring::<16>::new();
    let (mut producer, consumer) = ring.split().unwrap();
    let mut scheduler = DrainScheduler::new(consumer, Collect::default(), TickRate::default());

    producer.write(&bytes(0..12));
    producer.write(&bytes(12..20));

    let report = scheduler.on_tick(0);

    assert!(report.overflowed());
    assert_eq!(report.lost, 4);
    assert_eq!(report.emitted, 16);
    // Newest 16 bytes, oldest first
    assert_eq!(scheduler.sink().0, bytes(4..20));
    assert_eq!(scheduler.stats().bytes_lost, 4);
    assert_eq!(scheduler.stats().overflows, 1);
}

#[test]
fn scheduler_streams_across_many_ticks() {
    let ring = Ring::<32>::new();
    let (mut producer, consumer) = ring.split().unwrap();
    let mut scheduler = DrainScheduler::new(consumer, Collect::default(), TickRate::default())
        .with_mode(DrainMode::OffsetPair);

    let mut expected = Vec::new();
    for tick in 0..100u64 {
        let burst: Vec<u8> = (0..(tick % 13) as u8).map(|i| i ^ tick as u8).collect();
        producer.write(&burst);
        expected.extend_from_slice(&burst);
        scheduler.on_tick(tick * 1000);
    }

    assert_eq!(scheduler.sink().0, expected);
    assert_eq!(scheduler.stats().bytes_emitted, expected.len() as u64);
    assert_eq!(scheduler.stats().late_ticks, 0);
    assert!(scheduler.stats().wrap_splits > 0);
}
