//! Startup banner

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

const DELIMITER: &str = "************************************************\r\n";
const APP_NAME: &str = " Sluice: UART ring buffer drain\r\n";
const HELP_ROUTE: &str = "Bytes arriving on UART RX are collected in a ring buffer.\r\n\
The ring is drained every tick and sent back out on UART TX.\r\n";
const HELP_TYPE: &str = "Start typing. Everything you type is echoed below:\r\n";

/// Write the welcome banner
pub async fn write_banner(tx: &mut BufferedUartTx) {
    for part in [DELIMITER, APP_NAME, DELIMITER, HELP_ROUTE, HELP_TYPE] {
        if let Err(e) = tx.write_all(part.as_bytes()).await {
            warn!("Failed to write banner: {:?}", e);
            return;
        }
    }

    if let Err(e) = tx.flush().await {
        warn!("Failed to flush banner: {:?}", e);
    }
}
