//! Character LCD drivers.
//!
//! [hd44780] holds the command set shared by HD44780-compatible controllers, and [serlcd] the
//! driver for SparkFun's serial backpack, which forwards those commands over a single serial line.

pub mod hd44780;
pub mod serlcd;
