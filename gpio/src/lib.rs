pub mod gpiod;
pub mod lcd;
pub mod serial;

use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum GpioError {
    #[error("pin already in use")]
    AlreadyInUse,
    #[error("invalid argument")]
    InvalidArgument,
    #[error("the feature is not supported on this backend")]
    NotSupported,
    #[error("IO error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for GpioError {
    fn from(err: std::io::Error) -> Self {
        GpioError::Io(err.kind())
    }
}

pub type GpioResult<T> = Result<T, GpioError>;

pub trait GpioDriver: Debug {
    /// Gets the amount of GPIO pins available.
    fn count(&self) -> GpioResult<usize>;

    /// Gets the GPIO pin at the given index.
    fn get_pin(&self, index: usize) -> GpioResult<Box<dyn GpioPin + '_>>;
}

/// Specifies the active level of the GPIO pin.
///
/// By default, the active level is high. A serial line driven through an inverting level shifter
/// (or wired straight to an RS-232 input) needs it set to low, so that the idle state still reads
/// as `true`.
///
/// Might be software-implemented.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GpioActiveLevel {
    #[default] High,
    Low,
}

impl GpioActiveLevel {
    /// Gets the real state that will be outputted on the GPIO pin based on the active level and the value.
    pub fn get_state(&self, value: bool) -> bool {
        match self {
            GpioActiveLevel::High => value,
            GpioActiveLevel::Low => !value,
        }
    }
}

pub trait GpioPin: Debug {
    /// Sets the GPIO pin function to output, allowing writing its state.
    fn as_output(&mut self) -> GpioResult<Box<dyn GpioOutput + '_>>;

    /// Gets the active level of the GPIO pin.
    fn active_level(&self) -> GpioActiveLevel {
        GpioActiveLevel::High
    }
    /// Sets the active level of the GPIO pin.
    ///
    /// Has to be called before [GpioPin::as_output] to take effect.
    ///
    /// # Errors
    /// - `GpioError::NotSupported` if the pin does not support active level.
    fn set_active_level(&mut self, _level: GpioActiveLevel) -> GpioResult<()> {
        Err(GpioError::NotSupported)
    }
}

pub trait GpioOutput: Debug {
    /// Writes the state of the GPIO pin.
    fn write(&self, value: bool) -> GpioResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_level_inverts_low() {
        assert!(GpioActiveLevel::High.get_state(true));
        assert!(!GpioActiveLevel::High.get_state(false));
        assert!(!GpioActiveLevel::Low.get_state(true));
        assert!(GpioActiveLevel::Low.get_state(false));
    }

    #[test]
    fn io_errors_keep_their_kind() {
        let err: GpioError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert_eq!(err, GpioError::Io(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.to_string(), "IO error: permission denied");
    }
}
