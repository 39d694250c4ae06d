use crate::{GpioError, GpioResult};
use std::fmt::Debug;

/// Command encoding for HD44780-compatible controllers.
///
/// Every high-level method builds the command byte and hands it to [HD44780Driver::send_command].
/// Implementors only decide how bytes reach the controller.
pub trait HD44780Driver: Debug {
    /// Clears the display and sets the cursor to the home position.
    ///
    /// Command: `00000001`.
    fn clear_display(&mut self) -> GpioResult<()> {
        self.send_command(0b00000001)
    }

    /// Sets the cursor to the home position.
    ///
    /// Command: `0000001?`.
    fn return_home(&mut self) -> GpioResult<()> {
        self.send_command(0b00000010)
    }

    /// Sets the entry mode: which way the cursor moves after a write, and whether the display
    /// shifts along with it.
    ///
    /// Command: `000001IS`.
    /// `I` is `1` for right cursor direction (left-to-right text), `0` for left.
    /// `S` is `1` for display shift (autoscroll), `0` for no shift.
    fn set_entry_mode(&mut self, cursor_direction: CursorDirection, shift: bool) -> GpioResult<()> {
        let mut command = 0b00000100;
        if cursor_direction == CursorDirection::Right {
            command |= 0b00000010;
        }
        if shift {
            command |= 0b00000001;
        }
        self.send_command(command)
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    ///
    /// Command: `00001DCB`.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> GpioResult<()> {
        let mut command = 0b00001000;
        if display_on {
            command |= 0b00000100;
        }
        if cursor_on {
            command |= 0b00000010;
        }
        if blink_on {
            command |= 0b00000001;
        }
        self.send_command(command)
    }

    /// Moves the cursor or shifts the display.
    ///
    /// Command: `0001DR??`.
    /// `D` is `1` for display shift, `0` for cursor move.
    /// `R` is `1` for right, `0` for left.
    fn cursor_shift(&mut self, display_shift: bool, direction: CursorDirection) -> GpioResult<()> {
        let mut command = 0b00010000;
        if display_shift {
            command |= 0b00001000;
        }
        if direction == CursorDirection::Right {
            command |= 0b00000100;
        }
        self.send_command(command)
    }

    /// Sets the CGRAM address (custom character memory).
    ///
    /// The address is a 6-bit value: character slot in the upper 3 bits, glyph row in the lower 3.
    /// If out of bounds, it will return [GpioError::InvalidArgument].
    ///
    /// Command: `01AAAAAA`.
    fn set_cgram_address(&mut self, address: u8) -> GpioResult<()> {
        if address > 0b00111111 {
            return Err(GpioError::InvalidArgument);
        }
        let command = 0b01000000 | address;
        self.send_command(command)
    }

    /// Sets the DDRAM address, which moves the cursor.
    ///
    /// The address is a 7-bit value. If out of bounds, it will return [GpioError::InvalidArgument].
    ///
    /// Command: `1AAAAAAA`.
    fn set_ddram_address(&mut self, address: u8) -> GpioResult<()> {
        if address > 0b01111111 {
            return Err(GpioError::InvalidArgument);
        }
        let command = 0b10000000 | address;
        self.send_command(command)
    }

    /// Sends a command to the HD44780 controller.
    fn send_command(&mut self, command: u8) -> GpioResult<()>;

    /// Sends data (a character code, or a glyph row after [HD44780Driver::set_cgram_address]).
    fn send_data(&mut self, data: u8) -> GpioResult<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CursorDirection {
    /// Moves the cursor to the left after writing data.
    Left,
    /// Moves the cursor to the right after writing data.
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        commands: Vec<u8>,
    }

    impl HD44780Driver for Recorder {
        fn send_command(&mut self, command: u8) -> GpioResult<()> {
            self.commands.push(command);
            Ok(())
        }

        fn send_data(&mut self, _data: u8) -> GpioResult<()> {
            Ok(())
        }
    }

    #[test]
    fn encodes_commands() {
        let mut lcd = Recorder::default();
        lcd.clear_display().unwrap();
        lcd.return_home().unwrap();
        lcd.set_entry_mode(CursorDirection::Right, false).unwrap();
        lcd.set_entry_mode(CursorDirection::Left, true).unwrap();
        lcd.set_display_control(true, false, true).unwrap();
        lcd.cursor_shift(false, CursorDirection::Left).unwrap();
        lcd.cursor_shift(true, CursorDirection::Right).unwrap();
        assert_eq!(lcd.commands, [0x01, 0x02, 0x06, 0x05, 0x0D, 0x10, 0x1C]);
    }

    #[test]
    fn address_setters_reject_out_of_range() {
        let mut lcd = Recorder::default();
        assert_eq!(lcd.set_cgram_address(0x40), Err(GpioError::InvalidArgument));
        assert_eq!(lcd.set_ddram_address(0x80), Err(GpioError::InvalidArgument));
        assert!(lcd.commands.is_empty());

        lcd.set_cgram_address(0x3F).unwrap();
        lcd.set_ddram_address(0x67).unwrap();
        assert_eq!(lcd.commands, [0x7F, 0xE7]);
    }
}
