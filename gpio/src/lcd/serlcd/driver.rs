use crate::lcd::hd44780::driver::{CursorDirection, HD44780Driver};
use crate::lcd::serlcd::{
    Brightness, COMMAND_DELAY, COMMAND_PREFIX, DisplayControl, EntryMode, Geometry, ROW_OFFSETS,
    SPECIAL_COMMAND_PREFIX, SpecialCommand,
};
use crate::serial::SerialTx;
use crate::{GpioError, GpioResult};
use log::{debug, trace, warn};

/// Driver for a SparkFun serLCD, talking through any [SerialTx].
///
/// The driver keeps its own copy of the display control and entry mode registers, since the
/// backpack can't be read back. Every toggle updates the copy and re-sends the whole register.
///
/// Creating the driver doesn't send anything; the display is assumed to be in its power-up state
/// (16x2, display on, no cursor, left-to-right). Call [SerialLcd::init] to configure a different
/// geometry.
///
/// Row and column numbers start at 0.
#[derive(Debug)]
pub struct SerialLcd<T: SerialTx> {
    tx: T,
    row_offsets: [u8; 4],
    display_control: DisplayControl,
    entry_mode: EntryMode,
    geometry: Geometry,
}

impl<T: SerialTx> SerialLcd<T> {
    pub fn new(tx: T) -> Self {
        SerialLcd {
            tx,
            row_offsets: ROW_OFFSETS,
            display_control: DisplayControl::default(),
            entry_mode: EntryMode::default(),
            geometry: Geometry::default(),
        }
    }

    /// Configures the backpack for the given geometry, clears the display and sets the backlight
    /// to full brightness.
    ///
    /// Both the geometry and the brightness are stored in the backpack's EEPROM, so this only has
    /// to be done once per display.
    pub fn init(&mut self, geometry: Geometry) -> GpioResult<()> {
        debug!("Configuring {:?}", geometry);
        self.geometry = geometry;
        self.special_command(SpecialCommand::SetColumns(geometry.columns))?;
        self.special_command(SpecialCommand::SetLines(geometry.lines))?;
        self.clear()?;
        self.set_brightness(Brightness::MAX)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn display_control(&self) -> DisplayControl {
        self.display_control
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    pub fn row_offsets(&self) -> [u8; 4] {
        self.row_offsets
    }

    pub fn tx(&self) -> &T {
        &self.tx
    }

    /// Gives the transmitter back.
    pub fn release(self) -> T {
        self.tx
    }

    /// Sends a command handled by the backpack itself, prefixed with `0x7C`.
    pub fn special_command(&mut self, command: SpecialCommand) -> GpioResult<()> {
        trace!("Sending special command: {:?}", command);
        self.send_framed(SPECIAL_COMMAND_PREFIX, command.to_byte())
    }

    fn send_framed(&mut self, prefix: u8, value: u8) -> GpioResult<()> {
        self.tx.transmit(prefix)?;
        self.tx.transmit(value)?;
        self.tx.delay(COMMAND_DELAY);
        Ok(())
    }

    /// Clears the display and returns the cursor to the home position.
    pub fn clear(&mut self) -> GpioResult<()> {
        self.clear_display()
    }

    /// Returns the cursor to the home position.
    pub fn home(&mut self) -> GpioResult<()> {
        self.return_home()
    }

    /// Moves the cursor to `row` (`0..=3`) and `col`.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` if `row` is above 3 or the resulting address doesn't fit in
    ///   DDRAM. Nothing is sent in that case.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> GpioResult<()> {
        let Some(&offset) = self.row_offsets.get(row as usize) else {
            debug!("Row {} out of range", row);
            return Err(GpioError::InvalidArgument);
        };
        let address = offset.checked_add(col).ok_or(GpioError::InvalidArgument)?;
        self.set_ddram_address(address)
    }

    /// Moves the cursor one character to the left.
    pub fn left(&mut self) -> GpioResult<()> {
        self.cursor_shift(false, CursorDirection::Left)
    }

    /// Moves the cursor one character to the right.
    pub fn right(&mut self) -> GpioResult<()> {
        self.cursor_shift(false, CursorDirection::Right)
    }

    /// Shifts the whole display one character to the left.
    pub fn scroll_left(&mut self) -> GpioResult<()> {
        self.cursor_shift(true, CursorDirection::Left)
    }

    /// Shifts the whole display one character to the right.
    pub fn scroll_right(&mut self) -> GpioResult<()> {
        self.cursor_shift(true, CursorDirection::Right)
    }

    /// Moves the cursor to the beginning of `row`.
    ///
    /// Rows above the configured line count are silently ignored. `row` equal to the line count is
    /// still passed on to [SerialLcd::set_cursor].
    pub fn select_line(&mut self, row: u8) -> GpioResult<()> {
        if row > self.geometry.lines.count() {
            debug!("Line {} out of range, ignoring", row);
            return Ok(());
        }
        self.set_cursor(row, 0)
    }

    /// Overwrites `row` with spaces and leaves the cursor at its beginning.
    ///
    /// Rows that aren't visible are silently ignored. Blanking one of them would spill over into
    /// the next visible row once the address counter wraps.
    pub fn clear_line(&mut self, row: u8) -> GpioResult<()> {
        if row >= self.geometry.lines.count() {
            debug!("Line {} not visible, ignoring", row);
            return Ok(());
        }
        self.set_cursor(row, 0)?;
        for _ in 0..self.geometry.columns.count() {
            self.send_data(b' ')?;
        }
        self.set_cursor(row, 0)
    }

    fn update_entry_mode(&mut self, update: impl FnOnce(&mut EntryMode)) -> GpioResult<()> {
        update(&mut self.entry_mode);
        let EntryMode { direction, shift } = self.entry_mode;
        self.set_entry_mode(direction, shift)
    }

    /// Text flows left to right.
    pub fn left_to_right(&mut self) -> GpioResult<()> {
        self.update_entry_mode(|mode| mode.direction = CursorDirection::Right)
    }

    /// Text flows right to left.
    pub fn right_to_left(&mut self) -> GpioResult<()> {
        self.update_entry_mode(|mode| mode.direction = CursorDirection::Left)
    }

    /// The display shifts with every character written, keeping the cursor in place.
    pub fn autoscroll(&mut self) -> GpioResult<()> {
        self.update_entry_mode(|mode| mode.shift = true)
    }

    pub fn no_autoscroll(&mut self) -> GpioResult<()> {
        self.update_entry_mode(|mode| mode.shift = false)
    }

    fn update_display_control(&mut self, update: impl FnOnce(&mut DisplayControl)) -> GpioResult<()> {
        update(&mut self.display_control);
        let DisplayControl { display_on, cursor_on, blink_on } = self.display_control;
        self.set_display_control(display_on, cursor_on, blink_on)
    }

    /// Turns on the blinking block cursor.
    pub fn blink(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.blink_on = true)
    }

    pub fn no_blink(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.blink_on = false)
    }

    /// Turns on the underline cursor.
    pub fn cursor(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.cursor_on = true)
    }

    pub fn no_cursor(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.cursor_on = false)
    }

    /// Turns the display on. The contents are kept while it's off.
    pub fn display(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.display_on = true)
    }

    pub fn no_display(&mut self) -> GpioResult<()> {
        self.update_display_control(|control| control.display_on = false)
    }

    /// Sets the backlight brightness, from 1 (off) to 30 (full).
    ///
    /// Values outside of that range are ignored and nothing is sent.
    pub fn set_brightness(&mut self, level: u8) -> GpioResult<()> {
        match Brightness::new(level) {
            Some(brightness) => self.special_command(SpecialCommand::Backlight(brightness)),
            None => {
                debug!("Brightness {} out of range, ignoring", level);
                Ok(())
            }
        }
    }

    /// Saves the first two lines currently displayed as the splash screen.
    pub fn set_splash(&mut self) -> GpioResult<()> {
        self.special_command(SpecialCommand::SaveSplash)
    }

    /// Enables or disables the splash screen.
    pub fn toggle_splash(&mut self) -> GpioResult<()> {
        self.special_command(SpecialCommand::ToggleSplash)
    }

    /// Defines the custom character at `location` (`0..=7`, higher bits are dropped).
    ///
    /// Each byte of `charmap` is one row of the 5x8 glyph, top to bottom, using the lowest 5 bits.
    pub fn create_char(&mut self, location: u8, charmap: &[u8; 8]) -> GpioResult<()> {
        let location = location & 0b111;
        for (i, &row) in charmap.iter().enumerate() {
            self.set_cgram_address((location << 3) | i as u8)?;
            self.send_data(row)?;
        }
        Ok(())
    }

    /// Writes the custom character defined at `location` at the cursor.
    pub fn print_custom_char(&mut self, location: u8) -> GpioResult<()> {
        self.send_data(location)
    }

    /// Writes `s` at the cursor. Characters outside of ASCII are replaced with `?`.
    pub fn print(&mut self, s: &str) -> GpioResult<()> {
        for c in s.chars() {
            if c.is_ascii() {
                self.send_data(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.send_data(b'?')?;
            }
        }
        Ok(())
    }
}

impl<T: SerialTx> HD44780Driver for SerialLcd<T> {
    fn send_command(&mut self, command: u8) -> GpioResult<()> {
        trace!("Sending command: {:08b}", command);
        self.send_framed(COMMAND_PREFIX, command)
    }

    fn send_data(&mut self, data: u8) -> GpioResult<()> {
        trace!("Sending data: {:08b}", data);
        self.tx.transmit(data)
    }
}

/// Allows `write!` straight to the display, the same way as [SerialLcd::print].
impl<T: SerialTx> std::fmt::Write for SerialLcd<T> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.print(s).map_err(|_| std::fmt::Error)
    }
}
