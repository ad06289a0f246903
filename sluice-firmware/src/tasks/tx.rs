//! UART transmit task
//!
//! Sends drained bytes from the TX pipe out on UART TX.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::TX_PIPE;

/// Bytes moved from the pipe per UART write
const TX_CHUNK: usize = 64;

/// TX task - forwards the TX pipe to the UART
#[embassy_executor::task]
pub async fn tx_task(mut tx: BufferedUartTx) {
    info!("TX task started");

    let mut buf = [0u8; TX_CHUNK];

    loop {
        let n = TX_PIPE.read(&mut buf).await;
        if let Err(e) = tx.write_all(&buf[..n]).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
