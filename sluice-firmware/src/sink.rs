//! Drain sink backed by the TX pipe

use core::convert::Infallible;

use embassy_sync::pipe::TryWriteError;
use sluice_core::Sink;

use crate::channels::TX_PIPE;

/// Non-blocking sink into [`TX_PIPE`]
///
/// The drain runs once per tick and must never wait on the UART. Bytes are
/// queued for the TX task; a full pipe accepts nothing and the drain's sink
/// policy decides what happens to the rest.
pub struct PipeSink;

impl Sink for PipeSink {
    type Error = Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        match TX_PIPE.try_write(bytes) {
            Ok(n) => Ok(n),
            Err(TryWriteError::Full) => Ok(0),
        }
    }
}
