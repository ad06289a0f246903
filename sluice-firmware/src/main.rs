//! Sluice - UART Ring Buffer Drain Firmware
//!
//! Bytes received on UART0 are written into a fixed-capacity ring buffer
//! by the RX task. A periodic drain task emits everything written since
//! the previous tick, in order, to UART0 TX.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod banner;
mod channels;
mod config;
mod sink;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// UART driver buffer sizes
const UART_TX_BUF_SIZE: usize = 256;
const UART_RX_BUF_SIZE: usize = 256;

static UART_TX_BUF: StaticCell<[u8; UART_TX_BUF_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_RX_BUF_SIZE]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sluice firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // UART0 on GPIO0 (TX) / GPIO1 (RX)
    let tx_buf = UART_TX_BUF.init([0u8; UART_TX_BUF_SIZE]);
    let rx_buf = UART_RX_BUF.init([0u8; UART_RX_BUF_SIZE]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, config::uart_config());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (mut tx, rx) = uart.split();
    info!("UART0 initialized at {} baud", config::SERIAL.baudrate);

    // Banner goes out before the drain owns the TX path
    if config::BANNER {
        banner::write_banner(&mut tx).await;
    }

    let (producer, consumer) = unwrap!(channels::RING.split());
    info!("Ring buffer ready: {} bytes", config::RING_CAPACITY);

    spawner.spawn(tasks::rx_task(rx, producer)).unwrap();
    spawner.spawn(tasks::drain_task(consumer)).unwrap();
    spawner.spawn(tasks::tx_task(tx)).unwrap();
    if config::STATS_INTERVAL_S > 0 {
        spawner.spawn(tasks::stats_task()).unwrap();
    }

    info!("All tasks spawned, firmware running");
}
