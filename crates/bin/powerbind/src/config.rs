//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `powerbind.toml` in the working directory (or the path in
//! `POWERBIND_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use powerbind_domain::control::DeclarationSet;
use powerbind_domain::error::ConfigurationError;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The power device the controls are bound to.
    pub device: DeviceConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Declared controls, keyed by control name.
    pub controls: DeclarationSet,
}

/// Device handle settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Name used in logs and config dumps.
    pub name: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present), apply
    /// environment-variable overrides, then validate every declared control.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if any
    /// declared control fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("POWERBIND_CONFIG").unwrap_or_else(|_| "powerbind.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("POWERBIND_DEVICE_NAME") {
            self.device.name = val;
        }
        if let Ok(val) = std::env::var("POWERBIND_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.device.name.is_empty() {
            return Err(ConfigError::Validation(
                "device name must not be empty".to_string(),
            ));
        }
        self.controls.validate()?;
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "ups".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "powerbind=info,powerbind_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
    /// A declared control override is malformed.
    #[error("invalid control declaration")]
    Controls(#[from] ConfigurationError),
}
