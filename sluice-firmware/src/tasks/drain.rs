//! Periodic drain task
//!
//! Runs the drain scheduler at the configured tick rate. Each tick emits
//! every byte written since the previous tick into the TX pipe.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use sluice_core::{Consumer, DrainScheduler, TickRate};

use crate::channels::STATS_SNAPSHOT;
use crate::config::{DRAIN_MODE, RING_CAPACITY, SINK_POLICY, STATS_INTERVAL_S, TICK_HZ};
use crate::sink::PipeSink;

/// Drain task - consumer side of the ring
#[embassy_executor::task]
pub async fn drain_task(consumer: Consumer<'static, RING_CAPACITY>) {
    let rate = TickRate::from_hz(TICK_HZ);
    info!(
        "Drain task started: {} Hz, {} byte ring, {:?} mode",
        rate.hz(),
        RING_CAPACITY,
        DRAIN_MODE
    );

    let mut scheduler = DrainScheduler::new(consumer, PipeSink, rate)
        .with_policy(SINK_POLICY)
        .with_mode(DRAIN_MODE);

    // Ticks between statistics snapshots (0 = never)
    let snapshot_every = u32::from(STATS_INTERVAL_S).saturating_mul(rate.hz());
    let mut since_snapshot: u32 = 0;
    let mut announced = false;

    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_micros(rate.period_us()));

    loop {
        ticker.next().await;

        let report = scheduler.on_tick(start.elapsed().as_micros());

        if !announced {
            info!("Drain tick running");
            announced = true;
        }

        if report.overflowed() {
            debug!("Ring overflow: {} bytes lost this tick", report.lost);
        }

        if snapshot_every > 0 {
            since_snapshot += 1;
            if since_snapshot >= snapshot_every {
                since_snapshot = 0;
                STATS_SNAPSHOT.signal(*scheduler.stats());
            }
        }
    }
}
