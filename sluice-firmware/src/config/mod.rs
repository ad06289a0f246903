//! Build-time drain configuration
//!
//! Constants generated by build.rs from sluice.toml, plus the mapping of
//! the serial settings onto the RP2040 UART.

use embassy_rp::uart::{
    Config as UartConfig, DataBits as UartDataBits, Parity as UartParity,
    StopBits as UartStopBits,
};
use sluice_core::config::{DataBits, Parity, SerialConfig, StopBits};
use sluice_core::{DrainMode, SinkPolicy};

include!(concat!(env!("OUT_DIR"), "/sluice_config.rs"));

/// UART configuration for the serial settings
pub fn uart_config() -> UartConfig {
    let mut cfg = UartConfig::default();
    cfg.baudrate = SERIAL.baudrate;
    cfg.data_bits = match SERIAL.data_bits {
        DataBits::Five => UartDataBits::DataBits5,
        DataBits::Six => UartDataBits::DataBits6,
        DataBits::Seven => UartDataBits::DataBits7,
        DataBits::Eight => UartDataBits::DataBits8,
    };
    cfg.parity = match SERIAL.parity {
        Parity::None => UartParity::ParityNone,
        Parity::Even => UartParity::ParityEven,
        Parity::Odd => UartParity::ParityOdd,
    };
    cfg.stop_bits = match SERIAL.stop_bits {
        StopBits::One => UartStopBits::STOP1,
        StopBits::Two => UartStopBits::STOP2,
    };
    cfg
}
