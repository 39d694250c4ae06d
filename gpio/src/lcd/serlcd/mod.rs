//! SparkFun serLCD driver module.
//!
//! The serLCD is an HD44780 character display with a small microcontroller on the back that
//! listens on a serial line (9600 baud, 8N1 by default). Plain bytes are written to the display as
//! characters. Two prefix bytes switch the meaning of the byte that follows:
//!
//! - `0xFE` ([COMMAND_PREFIX]) forwards the next byte to the HD44780 as an instruction, so the
//!   whole [HD44780Driver](super::hd44780::driver::HD44780Driver) command set is available;
//! - `0x7C` ([SPECIAL_COMMAND_PREFIX]) is handled by the backpack itself: backlight brightness,
//!   splash screen and display geometry. See [SpecialCommand].
//!
//! The backpack needs time to process every prefixed command, so each one is followed by
//! [COMMAND_DELAY]. Plain characters can be streamed back to back.
//!
//! See [SerialLcd] for the driver itself. Written against backpack firmware version 2.5.

mod driver;

use crate::lcd::hd44780::driver::CursorDirection;
use crate::{GpioError, GpioResult};
use std::time::Duration;
pub use driver::*;

/// Prefix for instructions forwarded to the HD44780.
pub const COMMAND_PREFIX: u8 = 0xFE;

/// Prefix for commands handled by the serLCD backpack.
pub const SPECIAL_COMMAND_PREFIX: u8 = 0x7C;

/// How long the backpack gets to process a prefixed command.
pub const COMMAND_DELAY: Duration = Duration::from_millis(5);

/// DDRAM address of the first column of each row.
///
/// Rows 2 and 3 of a 4-line display are the continuation of rows 0 and 1, hence the odd offsets.
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x27, 0x67];

/// Backlight brightness level, from 1 (off) to 30 (full).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 30;

    pub const OFF: Brightness = Brightness(Self::MIN);
    pub const FULL: Brightness = Brightness(Self::MAX);

    /// Gets the brightness for `level`, or `None` if it's outside of `1..=30`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Brightness(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

/// Number of lines of the display.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Lines {
    #[default]
    Two,
    Four,
}

impl Lines {
    pub fn count(&self) -> u8 {
        match self {
            Lines::Two => 2,
            Lines::Four => 4,
        }
    }
}

impl TryFrom<u8> for Lines {
    type Error = GpioError;

    fn try_from(count: u8) -> GpioResult<Self> {
        match count {
            2 => Ok(Lines::Two),
            4 => Ok(Lines::Four),
            _ => Err(GpioError::InvalidArgument),
        }
    }
}

/// Number of characters per line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Columns {
    #[default]
    Sixteen,
    Twenty,
}

impl Columns {
    pub fn count(&self) -> u8 {
        match self {
            Columns::Sixteen => 16,
            Columns::Twenty => 20,
        }
    }
}

impl TryFrom<u8> for Columns {
    type Error = GpioError;

    fn try_from(count: u8) -> GpioResult<Self> {
        match count {
            16 => Ok(Columns::Sixteen),
            20 => Ok(Columns::Twenty),
            _ => Err(GpioError::InvalidArgument),
        }
    }
}

/// Size of the display. Defaults to 16x2.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Geometry {
    pub lines: Lines,
    pub columns: Columns,
}

impl Geometry {
    /// Gets the geometry for the given line and column counts.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` unless `lines` is 2 or 4 and `columns` is 16 or 20.
    pub fn new(lines: u8, columns: u8) -> GpioResult<Self> {
        Ok(Geometry {
            lines: lines.try_into()?,
            columns: columns.try_into()?,
        })
    }
}

/// Commands handled by the serLCD backpack, sent after [SPECIAL_COMMAND_PREFIX].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpecialCommand {
    /// Sets the backlight brightness. The setting is stored in the backpack's EEPROM.
    ///
    /// Command: `100BBBBB`, where `BBBBB` is the brightness level minus one.
    Backlight(Brightness),
    /// Saves the first two lines currently displayed as the splash screen.
    SaveSplash,
    /// Enables or disables the splash screen shown at power-up.
    ToggleSplash,
    /// Sets the number of characters per line.
    SetColumns(Columns),
    /// Sets the number of lines.
    SetLines(Lines),
}

impl SpecialCommand {
    /// Converts the special command to the byte sent after the prefix.
    pub fn to_byte(&self) -> u8 {
        match self {
            SpecialCommand::Backlight(brightness) => 0b10000000 | (brightness.level() - 1),
            SpecialCommand::SaveSplash => 0x0A,
            SpecialCommand::ToggleSplash => 0x09,
            SpecialCommand::SetColumns(Columns::Twenty) => 0x03,
            SpecialCommand::SetColumns(Columns::Sixteen) => 0x04,
            SpecialCommand::SetLines(Lines::Four) => 0x05,
            SpecialCommand::SetLines(Lines::Two) => 0x06,
        }
    }
}

/// Display on/off control register.
///
/// The default is the state the backpack leaves the controller in at power-up: display on, no
/// cursor, no blinking.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayControl {
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink_on: bool,
}

impl Default for DisplayControl {
    fn default() -> Self {
        DisplayControl {
            display_on: true,
            cursor_on: false,
            blink_on: false,
        }
    }
}

/// Entry mode register. Defaults to left-to-right text without autoscroll.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EntryMode {
    pub direction: CursorDirection,
    pub shift: bool,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode {
            direction: CursorDirection::Right,
            shift: false,
        }
    }
}
