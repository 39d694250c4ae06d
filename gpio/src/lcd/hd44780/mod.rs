//! HD44780 LCD module.
//!
//! Only the command encoding lives here. How a command reaches the controller (parallel bus, I2C
//! expander, serial backpack) is up to the implementor of [driver::HD44780Driver].

pub mod driver;
