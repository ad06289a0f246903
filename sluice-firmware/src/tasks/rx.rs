//! UART receive task
//!
//! The producer side of the ring: every byte read from UART RX is written
//! into the ring immediately, without waiting for the drain.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use sluice_core::Producer;

use crate::config::RING_CAPACITY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// RX task - moves received bytes into the ring
#[embassy_executor::task]
pub async fn rx_task(mut rx: BufferedUartRx, mut producer: Producer<'static, RING_CAPACITY>) {
    info!("RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);
                producer.write(&buf[..n]);
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
