use std::env::var_os;
use std::path::{Path, PathBuf};
use eyre::WrapErr;
use lq_gpio::lcd::hd44780::driver::{DisplayConfig, Font};
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub columns: u8,
    pub lines: u8,
    /// Use the 5x10 font. Only works on one-line displays.
    pub tall_font: bool,
    pub cursor: bool,
    pub blink: bool,
    pub greeting: String,
    /// Custom characters, uploaded to CGRAM slots 0-7 and shown after the greeting.
    pub glyphs: Vec<[u8; 8]>,
    /// Scroll the display left with this period, forever.
    pub marquee_ms: Option<u64>,
}

impl Config {
    fn path() -> PathBuf {
        var_os("CONFIG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("lcd.json"))
    }

    /// Loads the config from `$CONFIG_FILE` or `lcd.json`.
    ///
    /// Returns `Ok(None)` only if the file does not exist. A file that can't be read or parsed is
    /// an error, so it never gets replaced by the defaults.
    pub fn try_load() -> eyre::Result<Option<Self>> {
        Self::load_from(&Self::path())
    }

    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&Self::path())
    }

    fn load_from(config_path: &Path) -> eyre::Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)?;
        let reader = std::io::BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .wrap_err_with(|| format!("Invalid config {}", config_path.display()))?;
        Ok(Some(config))
    }

    fn save_to(&self, config_path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(config_path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            columns: self.columns,
            lines: self.lines,
            font: if self.tall_font { Font::Dots5x10 } else { Font::Dots5x8 },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            columns: 16,
            lines: 2,
            tall_font: false,
            cursor: false,
            blink: false,
            greeting: "Hello, world!".to_string(),
            glyphs: vec![
                // Heart
                [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00],
                // Smiley
                [0x00, 0x0A, 0x0A, 0x00, 0x11, 0x0E, 0x00, 0x00],
            ],
            marquee_ms: None,
        }
    }
}
