//! Drain statistics task

use defmt::*;

use sluice_core::DrainStats;

use crate::channels::STATS_SNAPSHOT;

/// Stats task - logs each drain snapshot and warns on new data loss
#[embassy_executor::task]
pub async fn stats_task() {
    info!("Stats task started");

    let mut previous = DrainStats::new();

    loop {
        let stats = STATS_SNAPSHOT.wait().await;

        info!(
            "Drain: {} ticks ({} idle, {} late), {} bytes out, {} wrap splits",
            stats.ticks, stats.idle_ticks, stats.late_ticks, stats.bytes_emitted, stats.wrap_splits
        );

        if stats.bytes_lost > previous.bytes_lost {
            warn!(
                "Producer overran the ring: {} bytes lost since last report ({} overflows total)",
                stats.bytes_lost - previous.bytes_lost,
                stats.overflows
            );
        }
        if stats.bytes_dropped > previous.bytes_dropped {
            warn!(
                "TX path full: {} bytes dropped since last report",
                stats.bytes_dropped - previous.bytes_dropped
            );
        }
        if stats.sink_errors > previous.sink_errors {
            warn!("Sink errors: {} total", stats.sink_errors);
        }

        previous = stats;
    }
}
