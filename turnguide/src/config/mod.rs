//! Configuration file handling.
//!
//! Settings live in an INI file under the platform configuration
//! directory (`~/.config/turnguide/config.ini` on Linux):
//!
//! ```ini
//! [guidance]
//! threshold_meters = 100
//!
//! [feed]
//! update_interval_millis = 5000
//! ```
//!
//! Missing files and missing keys fall back to defaults. CLI arguments
//! override config file values when specified. [`ConfigKey`] gives the
//! CLI a typed get/set surface over the known keys.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::tracker::DEFAULT_THRESHOLD_M;

/// Default pacing between replayed fixes, in milliseconds. Owned by
/// the feed; the tracker never consults it.
pub const DEFAULT_UPDATE_INTERVAL_MILLIS: u64 = 5000;

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    /// A config value failed to parse or validate.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The config file exists but is not valid INI.
    #[error("failed to parse config file: {0}")]
    Parse(String),

    /// The config file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Guidance settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceConfig {
    /// Distance below which a maneuver counts as reached, in meters.
    pub threshold_meters: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_M,
        }
    }
}

/// Position feed settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Pacing between replayed fixes, in milliseconds.
    pub update_interval_millis: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            update_interval_millis: DEFAULT_UPDATE_INTERVAL_MILLIS,
        }
    }
}

/// The on-disk configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    /// `[guidance]` section.
    pub guidance: GuidanceConfig,
    /// `[feed]` section.
    pub feed: FeedConfig,
}

impl ConfigFile {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path()?)
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        if let Some(value) = ini
            .section(Some("guidance"))
            .and_then(|section| section.get("threshold_meters"))
        {
            config.guidance.threshold_meters =
                parse_threshold("guidance.threshold_meters", value)?;
        }

        if let Some(value) = ini
            .section(Some("feed"))
            .and_then(|section| section.get("update_interval_millis"))
        {
            config.feed.update_interval_millis =
                parse_interval("feed.update_interval_millis", value)?;
        }

        Ok(config)
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path()?)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some("guidance"))
            .set("threshold_meters", self.guidance.threshold_meters.to_string());
        ini.with_section(Some("feed")).set(
            "update_interval_millis",
            self.feed.update_interval_millis.to_string(),
        );
        ini.write_to_file(path)?;
        Ok(())
    }
}

/// Path of the configuration file under the platform config directory.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("turnguide").join("config.ini"))
}

fn parse_threshold(key: &'static str, value: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    };

    let threshold: f64 = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(invalid("must be a positive number of meters".to_string()));
    }
    Ok(threshold)
}

fn parse_interval(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Error for an unrecognized configuration key name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownConfigKey;

/// Typed handle on one known configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `guidance.threshold_meters`
    ThresholdMeters,
    /// `feed.update_interval_millis`
    UpdateIntervalMillis,
}

impl ConfigKey {
    /// All known keys, in display order.
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::ThresholdMeters, ConfigKey::UpdateIntervalMillis]
    }

    /// Fully-qualified `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ThresholdMeters => "guidance.threshold_meters",
            ConfigKey::UpdateIntervalMillis => "feed.update_interval_millis",
        }
    }

    /// INI section this key lives in.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ThresholdMeters => "guidance",
            ConfigKey::UpdateIntervalMillis => "feed",
        }
    }

    /// Bare key name within its section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ThresholdMeters => "threshold_meters",
            ConfigKey::UpdateIntervalMillis => "update_interval_millis",
        }
    }

    /// Current value, rendered for display.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ThresholdMeters => config.guidance.threshold_meters.to_string(),
            ConfigKey::UpdateIntervalMillis => config.feed.update_interval_millis.to_string(),
        }
    }

    /// Parse, validate and apply a new value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        match self {
            ConfigKey::ThresholdMeters => {
                config.guidance.threshold_meters = parse_threshold(self.name(), value)?;
            }
            ConfigKey::UpdateIntervalMillis => {
                config.feed.update_interval_millis = parse_interval(self.name(), value)?;
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = UnknownConfigKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .find(|key| key.name() == s)
            .copied()
            .ok_or(UnknownConfigKey)
    }
}
