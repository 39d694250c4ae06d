use crate::serial::SerialTx;
use crate::{GpioError, GpioOutput, GpioResult};
use std::cell::RefCell;
use std::time::Duration;

/// Something that happened on a [MockTx].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TxEvent {
    Byte(u8),
    Delay(Duration),
}

/// Records everything sent through it instead of driving a line.
#[derive(Debug, Default)]
pub struct MockTx {
    pub events: Vec<TxEvent>,
    /// Fail with [GpioError::Io] once this many bytes went through.
    pub fail_after: Option<usize>,
}

impl MockTx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the bytes, without the delays.
    pub fn bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TxEvent::Byte(byte) => Some(*byte),
                TxEvent::Delay(_) => None,
            })
            .collect()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TxEvent::Delay(duration) => Some(*duration),
                TxEvent::Byte(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SerialTx for MockTx {
    fn transmit(&mut self, byte: u8) -> GpioResult<()> {
        if let Some(limit) = self.fail_after {
            if self.bytes().len() >= limit {
                return Err(GpioError::Io(std::io::ErrorKind::BrokenPipe));
            }
        }
        self.events.push(TxEvent::Byte(byte));
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.events.push(TxEvent::Delay(duration));
    }
}

/// Records every level written to it.
#[derive(Debug, Default)]
pub struct MockOutput {
    pub levels: RefCell<Vec<bool>>,
}

impl GpioOutput for MockOutput {
    fn write(&self, value: bool) -> GpioResult<()> {
        self.levels.borrow_mut().push(value);
        Ok(())
    }
}
