mod config;
mod utils;

use std::env::{var, var_os};
use std::thread;
use std::time::Duration;
use dotenv::dotenv;
use log::{debug, info};
use serlcd_gpio::gpiod::GpiodDriver;
use serlcd_gpio::lcd::serlcd::SerialLcd;
use serlcd_gpio::serial::SoftSerialTx;
use serlcd_gpio::{GpioActiveLevel, GpioDriver};
use sysinfo::System;
use time::OffsetDateTime;
use crate::config::Config;
use crate::utils::{fit_line, format_clock};

const DEFAULT_GPIO_CHIP: &str = "/dev/gpiochip0";

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    info!("serLCD starting...");

    let chip_path = var("SERLCD_GPIO_CHIP").unwrap_or_else(|_| DEFAULT_GPIO_CHIP.to_string());
    let tx_pin_no: usize = var("SERLCD_PIN_TX")?.parse()?;
    let tx_inverted = var_os("SERLCD_TX_INVERTED").is_some();

    info!("LCD @ {} TX: {}{}", chip_path, tx_pin_no, if tx_inverted { " (inverted)" } else { "" });

    let config_path = Config::path();
    debug!("Trying to load config from {}...", config_path.display());
    let config = if let Some(config) = Config::load_from(&config_path)? {
        info!("Config loaded.");
        config
    } else {
        info!("Config not found. Using default");
        let config = Config::default();
        config.save_to(&config_path)?;
        info!("Default config saved.");
        config
    };
    let geometry = config.geometry()?;
    let width = geometry.columns.count() as usize;

    debug!("Initializing GPIO driver...");
    let gpio = GpiodDriver::open(&chip_path)?;
    debug!("{:?} initialized.", gpio);

    debug!("Initializing LCD driver...");
    let mut tx_pin = gpio.get_pin(tx_pin_no)?;
    if tx_inverted {
        tx_pin.set_active_level(GpioActiveLevel::Low)?;
    }
    debug!("TX pin active level: {:?}", tx_pin.active_level());
    let tx_out = tx_pin.as_output()?;
    let tx = SoftSerialTx::new(&*tx_out)?;
    let mut lcd = SerialLcd::new(tx);

    // The backpack ignores input for a moment after power-up.
    thread::sleep(Duration::from_millis(500));

    if config.configure_geometry {
        lcd.init(geometry)?;
    }
    lcd.set_brightness(config.brightness)?;

    for (location, glyph) in config.custom_chars.iter().take(8).enumerate() {
        lcd.create_char(location as u8, glyph)?;
    }

    if var_os("SERLCD_SAVE_SPLASH").is_some() {
        if let Some(splash) = &config.splash {
            lcd.clear()?;
            for (row, line) in splash.iter().enumerate() {
                lcd.set_cursor(row as u8, 0)?;
                lcd.print(&fit_line(line, width))?;
            }
            lcd.set_splash()?;
            info!("Splash screen saved.");
        } else {
            info!("No splash screen configured, not saving.");
        }
    }

    lcd.clear()?;
    let host_name = System::host_name().unwrap_or_else(|| "serLCD".to_string());
    lcd.print(&fit_line(&host_name, width))?;

    debug!("{:?} initialized.", lcd);

    let glyphs = config.custom_chars.len().min(8);
    let clock_row = geometry.lines.count() - 1;

    info!("Starting main loop...");

    loop {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        lcd.set_cursor(clock_row, 0)?;
        for location in 0..glyphs {
            lcd.print_custom_char(location as u8)?;
        }
        lcd.print(&fit_line(&format_clock(now), width - glyphs))?;

        thread::sleep(Duration::from_millis(250));
    }
}
