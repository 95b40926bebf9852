//! # Configuration
//!
//! All tuning lives in one TOML file. Every section has defaults, and a
//! missing file loads as the default configuration so the game always starts.
//!
//! ```toml
//! [controller]
//! movement_speed = 200.0
//! joystick_threshold = 0.25
//! sprint_modifier = 1.35
//! merge_policy = "active_keyboard"
//!
//! [sprite]
//! size = 50.0
//! color = [0, 0, 0]
//! highlight_color = [220, 53, 69]
//!
//! [display]
//! headless = false
//! frame_interval_ms = 16
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! The file is looked up at `$PADSTEP_CONFIG`, falling back to
//! `<config dir>/padstep/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

use crate::controller::ControllerSettings;
use crate::math::Vector2;

pub const CONFIG_ENV: &str = "PADSTEP_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The controlled box.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SpriteConfig {
    /// Edge length of the square.
    pub size: f32,
    pub start: Vector2,
    pub color: (u8, u8, u8),
    /// Fill while gamepad button A is held.
    pub highlight_color: (u8, u8, u8),
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            start: Vector2::ZERO,
            color: (0x00, 0x00, 0x00),
            highlight_color: (0xdc, 0x35, 0x45),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Run the frame loop without a window.
    pub headless: bool,
    /// Frame period of the headless loop.
    pub frame_interval_ms: u64,
    pub window_title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            headless: false,
            frame_interval_ms: 16,
            window_title: "padstep".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub controller: ControllerSettings,
    pub sprite: SpriteConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// `$PADSTEP_CONFIG`, or the per-user config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("padstep").join("config.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads `path`, or returns the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controller.validate()?;

        if !self.sprite.size.is_finite() || self.sprite.size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sprite.size must be positive, got {}",
                self.sprite.size
            )));
        }
        if !self.sprite.start.is_finite() {
            return Err(ConfigError::Invalid(
                "sprite.start must be finite".to_string(),
            ));
        }
        if self.display.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "display.frame_interval_ms must be at least 1".to_string(),
            ));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.logging.level.parse::<Level>().map_err(|_| {
            ConfigError::Invalid(format!("unknown log level {:?}", self.logging.level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MergePolicy;
    use std::io::Write;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.controller.movement_speed, 100.0);
        assert_eq!(config.log_level().unwrap(), Level::INFO);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[controller]\nmovement_speed = 200.0\nmerge_policy = \"active_keyboard\"\n\n[sprite]\nhighlight_color = [1, 2, 3]"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.controller.movement_speed, 200.0);
        assert_eq!(config.controller.joystick_threshold, 0.25);
        assert_eq!(config.controller.merge_policy, MergePolicy::ActiveKeyboard);
        assert_eq!(config.sprite.highlight_color, (1, 2, 3));
        assert_eq!(config.sprite.size, 50.0);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = Config::from_toml_str("[controller]\njoystick_threshold = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[display]\nframe_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml_str("[controller\nmovement_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
