use std::env::var_os;
use std::path::{Path, PathBuf};
use eyre::WrapErr;
use serde::{Serialize, Deserialize};
use serlcd_gpio::GpioResult;
use serlcd_gpio::lcd::serlcd::{Brightness, Geometry};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of lines, 2 or 4.
    pub lines: u8,
    /// Number of characters per line, 16 or 20.
    pub columns: u8,
    /// Whether to send the geometry to the backpack on startup. It's kept in EEPROM, so only
    /// needed once per display.
    pub configure_geometry: bool,
    /// Backlight brightness, 1 (off) to 30 (full).
    pub brightness: u8,
    /// The two lines saved as the splash screen when `SERLCD_SAVE_SPLASH` is set.
    pub splash: Option<[String; 2]>,
    /// Custom 5x8 glyphs, loaded into slots 0 to 7 in order.
    pub custom_chars: Vec<[u8; 8]>,
}

impl Config {
    /// Gets the config file path from `CONFIG_FILE`, defaulting to `config.json`.
    pub fn path() -> PathBuf {
        var_os("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Loads the config from `path`.
    ///
    /// Returns `Ok(None)` only if the file doesn't exist. A file that can't be read or parsed is an
    /// error, so it never gets replaced with the defaults.
    pub fn load_from(path: &Path) -> eyre::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(path)
            .wrap_err_with(|| format!("Failed to open config file {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
        Ok(Some(config))
    }

    pub fn save_to(&self, path: &Path) -> eyre::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn geometry(&self) -> GpioResult<Geometry> {
        Geometry::new(self.lines, self.columns)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lines: 2,
            columns: 16,
            configure_geometry: false,
            brightness: Brightness::MAX,
            splash: None,
            custom_chars: vec![
                // Bell
                [0x04, 0x0E, 0x0E, 0x0E, 0x1F, 0x00, 0x04, 0x00],
                // Heart
                [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serlcd_gpio::GpioError;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{ "lines": 4, "columns": 20 }"#).unwrap();
        assert_eq!(config.brightness, 30);
        assert_eq!(config.custom_chars, Config::default().custom_chars);
        assert_eq!(config.geometry().unwrap(), Geometry::new(4, 20).unwrap());
    }

    #[test]
    fn unsupported_geometry_is_an_error() {
        let config = Config { lines: 3, ..Config::default() };
        assert_eq!(config.geometry(), Err(GpioError::InvalidArgument));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("serlcd-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_loads_as_none() {
        let path = temp_path("missing");
        assert!(Config::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_an_error_and_kept() {
        let path = temp_path("malformed");
        let contents = r#"{"lines":4,"columns":20,"brightness":"30"}"#;
        std::fs::write(&path, contents).unwrap();

        assert!(Config::load_from(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn saved_file_loads_back() {
        let path = temp_path("saved");
        let config = Config { brightness: 12, ..Config::default() };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), Some(config));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn round_trips_through_json() {
        let config = Config {
            splash: Some(["Hello".to_string(), "world".to_string()]),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }
}
