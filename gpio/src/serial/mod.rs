//! Transmit-only serial lines.
//!
//! [SerialTx] is the byte sink the display drivers talk to. It knows nothing about framing on the
//! wire, so it can be backed by a bit-banged pin ([SoftSerialTx]), a hardware UART, or a recorder
//! in tests.

mod soft;

#[cfg(test)]
pub(crate) mod mock;

use crate::GpioResult;
use std::fmt::Debug;
use std::thread::sleep;
use std::time::Duration;
pub use soft::*;

/// A blocking, transmit-only serial line.
pub trait SerialTx: Debug {
    /// Transmits a single byte, blocking until it is fully on the wire.
    fn transmit(&mut self, byte: u8) -> GpioResult<()>;

    /// Transmits all the bytes in order.
    fn transmit_all(&mut self, bytes: &[u8]) -> GpioResult<()> {
        for &byte in bytes {
            self.transmit(byte)?;
        }
        Ok(())
    }

    /// Blocks for the given duration, giving the receiving end time to process.
    fn delay(&mut self, duration: Duration) {
        sleep(duration);
    }
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    fn transmit(&mut self, byte: u8) -> GpioResult<()> {
        (**self).transmit(byte)
    }

    fn transmit_all(&mut self, bytes: &[u8]) -> GpioResult<()> {
        (**self).transmit_all(bytes)
    }

    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}
