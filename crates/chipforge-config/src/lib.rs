//! Configuration system for ChipForge.
//!
//! Load controller configuration from TOML or YAML files to set default job
//! settings, the presentation polling cadence, and job record naming
//! without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use chipforge_config::ChipForgeConfig;
//! use std::time::Duration;
//!
//! let config = ChipForgeConfig::from_toml_str(r#"
//!     [settings]
//!     match_color = false
//!     mark_max = 12
//!
//!     [controller]
//!     poll_interval_ms = 250
//! "#).unwrap();
//!
//! assert!(!config.settings.match_color);
//! assert_eq!(config.settings.mark_max, 12);
//! assert_eq!(config.poll_interval(), Duration::from_millis(250));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use chipforge_config::ChipForgeConfig;
//!
//! let config = ChipForgeConfig::load("chipforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use chipforge_core::domain::SettingsSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Default presentation polling cadence.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Remaining-time threshold above which the ETA carries a warning.
pub const DEFAULT_ETA_WARNING_SECS: u64 = 60 * 60;

/// Default file extension for saved job records.
pub const DEFAULT_RECORD_EXTENSION: &str = "fpc";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main ChipForge configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChipForgeConfig {
    /// Job settings used when a job is started without explicit settings.
    #[serde(default)]
    pub settings: SettingsSnapshot,

    /// Lifecycle controller configuration.
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Job record file configuration.
    #[serde(default)]
    pub records: RecordConfig,
}

impl ChipForgeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the default job settings.
    pub fn with_settings(mut self, settings: SettingsSnapshot) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the polling cadence in milliseconds.
    pub fn with_poll_interval_ms(mut self, millis: u64) -> Self {
        self.controller.poll_interval_ms = millis;
        self
    }

    /// Returns the presentation polling cadence.
    ///
    /// Convenience method that delegates to `controller.poll_interval()`.
    pub fn poll_interval(&self) -> Duration {
        self.controller.poll_interval()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.controller.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "controller.poll_interval_ms must be positive".to_string(),
            ));
        }
        if self.records.extension.is_empty() || self.records.extension.contains('.') {
            return Err(ConfigError::Invalid(format!(
                "records.extension must be a bare extension, got {:?}",
                self.records.extension
            )));
        }
        Ok(())
    }
}

/// Lifecycle controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ControllerConfig {
    /// How often presentation is expected to poll progress.
    pub poll_interval_ms: u64,

    /// Remaining seconds above which the ETA is flagged.
    pub eta_warning_secs: u64,
}

impl ControllerConfig {
    /// Returns the polling cadence as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            eta_warning_secs: DEFAULT_ETA_WARNING_SECS,
        }
    }
}

/// Job record file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RecordConfig {
    /// Extension appended to saved records that lack it.
    pub extension: String,
}

impl RecordConfig {
    /// Appends the record extension to `path` unless it already has it.
    pub fn with_extension(&self, path: impl AsRef<Path>) -> std::path::PathBuf {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str()) {
            path.to_path_buf()
        } else {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(&self.extension);
            name.into()
        }
    }
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_RECORD_EXTENSION.to_string(),
        }
    }
}
