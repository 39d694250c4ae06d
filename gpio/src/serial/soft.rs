use crate::serial::SerialTx;
use crate::{GpioError, GpioOutput, GpioResult};
use log::trace;
use std::fmt::{Debug, Formatter};
use std::hint::spin_loop;
use std::time::{Duration, Instant};

/// Baud rate the serLCD firmware listens at out of the box.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Bits in one 8N1 frame: start, 8 data bits, stop.
pub const FRAME_BITS: usize = 10;

/// Software (bit-banged) serial transmitter on a single GPIO output, using 8N1 framing.
///
/// The line idles high. Each byte is sent as a low start bit, the 8 data bits LSb first, and a
/// high stop bit. Bit edges are scheduled against the frame start and busy-waited, since
/// `sleep` overshoots by far more than a bit period at common baud rates.
pub struct SoftSerialTx<'a> {
    pin: &'a dyn GpioOutput,
    baud_rate: u32,
    bit_time: Duration,
}

impl<'a> SoftSerialTx<'a> {
    /// Creates a transmitter at [DEFAULT_BAUD_RATE] and drives the line to idle.
    pub fn new(pin: &'a dyn GpioOutput) -> GpioResult<Self> {
        pin.write(true)?;
        Ok(Self {
            pin,
            baud_rate: DEFAULT_BAUD_RATE,
            bit_time: Self::bit_time_for(DEFAULT_BAUD_RATE),
        })
    }

    /// Changes the baud rate.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` if `baud_rate` is zero.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> GpioResult<Self> {
        if baud_rate == 0 {
            return Err(GpioError::InvalidArgument);
        }
        self.baud_rate = baud_rate;
        self.bit_time = Self::bit_time_for(baud_rate);
        Ok(self)
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn bit_time(&self) -> Duration {
        self.bit_time
    }

    fn bit_time_for(baud_rate: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / baud_rate as u64)
    }

    /// Gets the line levels for one frame carrying `byte`, in transmission order.
    pub fn frame(byte: u8) -> [bool; FRAME_BITS] {
        let mut bits = [true; FRAME_BITS];
        bits[0] = false;
        for i in 0..8 {
            bits[i + 1] = (byte >> i) & 1 != 0;
        }
        bits
    }
}

impl Debug for SoftSerialTx<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SoftSerialTx({:?} @ {} baud)", self.pin, self.baud_rate)
    }
}

impl SerialTx for SoftSerialTx<'_> {
    fn transmit(&mut self, byte: u8) -> GpioResult<()> {
        trace!("Transmitting: {:08b}", byte);

        let start = Instant::now();
        for (i, bit) in Self::frame(byte).into_iter().enumerate() {
            self.pin.write(bit)?;
            let deadline = start + self.bit_time * (i as u32 + 1);
            while Instant::now() < deadline {
                spin_loop();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serial::mock::MockOutput;

    #[test]
    fn frame_is_start_data_lsb_first_stop() {
        assert_eq!(
            SoftSerialTx::frame(0x55),
            [false, true, false, true, false, true, false, true, false, true]
        );
        assert_eq!(
            SoftSerialTx::frame(0x01),
            [false, true, false, false, false, false, false, false, false, true]
        );
        assert_eq!(SoftSerialTx::frame(0xFF)[1..], [true; 9]);
    }

    #[test]
    fn new_drives_line_idle() {
        let pin = MockOutput::default();
        let tx = SoftSerialTx::new(&pin).unwrap();
        assert_eq!(*pin.levels.borrow(), vec![true]);
        assert_eq!(tx.baud_rate(), 9600);
        assert_eq!(tx.bit_time(), Duration::from_nanos(104_166));
    }

    #[test]
    fn transmit_writes_every_bit_and_takes_a_frame() {
        let pin = MockOutput::default();
        let mut tx = SoftSerialTx::new(&pin).unwrap().with_baud_rate(115_200).unwrap();
        pin.levels.borrow_mut().clear();

        let start = Instant::now();
        tx.transmit_all(&[0xFE, 0x01]).unwrap();
        let elapsed = start.elapsed();

        let mut expected = SoftSerialTx::frame(0xFE).to_vec();
        expected.extend(SoftSerialTx::frame(0x01));
        assert_eq!(*pin.levels.borrow(), expected);
        assert!(elapsed >= tx.bit_time() * 20);
        // Stop bit leaves the line idle.
        assert_eq!(pin.levels.borrow().last(), Some(&true));
    }

    #[test]
    fn zero_baud_rate_is_rejected() {
        let pin = MockOutput::default();
        let tx = SoftSerialTx::new(&pin).unwrap();
        assert_eq!(tx.with_baud_rate(0).unwrap_err(), GpioError::InvalidArgument);
    }
}
