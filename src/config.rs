//! Configuration management for weathergrid
//!
//! Handles loading configuration from a TOML file and environment variables
//! and validates the result.

use crate::WeatherGridError;
use crate::models::GridCell;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherGridConfig {
    /// KMA API hub settings
    pub kma: KmaConfig,
    /// Position fix source
    pub geolocation: GeolocationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// KMA API hub settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KmaConfig {
    /// API hub authentication key
    pub auth_key: Option<String>,
    /// Base URL of the API hub
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Geolocation collaborator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// Endpoint returning a JSON object with `lat` and `lon`
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Grid X used before any location is resolved
    pub grid_x: i32,
    /// Grid Y used before any location is resolved
    pub grid_y: i32,
}

fn default_kma_base_url() -> String {
    "https://apihub.kma.go.kr".to_string()
}

fn default_geolocation_url() -> String {
    "http://ip-api.com/json/".to_string()
}

fn default_timeout() -> u32 {
    10
}

impl Default for KmaConfig {
    fn default() -> Self {
        Self {
            auth_key: None,
            base_url: default_kma_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            url: default_geolocation_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        // Seoul, Jongno-gu
        Self {
            grid_x: 60,
            grid_y: 127,
        }
    }
}

impl DefaultsConfig {
    #[must_use]
    pub fn grid_cell(&self) -> GridCell {
        GridCell::new(self.grid_x, self.grid_y)
    }
}

impl WeatherGridConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the given file, falling back to the default location
    ///
    /// An explicitly given file must exist; the default location is optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_layered(config_path, Self::environment())
    }

    /// `WEATHERGRID_KMA__AUTH_KEY` -> `kma.auth_key`
    ///
    /// Values stay strings until deserialization so keys keep leading zeros.
    fn environment() -> Environment {
        Environment::with_prefix("WEATHERGRID")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_layered(config_path: Option<PathBuf>, environment: Environment) -> Result<Self> {
        let file = match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(WeatherGridError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                File::from(path).required(true)
            }
            None => File::from(
                Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml")),
            )
            .required(false),
        };

        let settings = Config::builder()
            .add_source(file.format(config::FileFormat::Toml))
            .add_source(environment)
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherGridConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weathergrid").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_auth_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The KMA key is optional until a weather request is made
    pub fn validate_auth_key(&self) -> Result<()> {
        if let Some(key) = &self.kma.auth_key {
            if key.trim().is_empty() {
                return Err(WeatherGridError::config(
                    "KMA auth key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }
        Ok(())
    }

    /// The KMA key, or a configuration error explaining how to set it
    pub fn require_auth_key(&self) -> crate::Result<&str> {
        self.kma.auth_key.as_deref().ok_or_else(|| {
            WeatherGridError::config(
                "kma.auth_key is not set (use the config file or WEATHERGRID_KMA__AUTH_KEY)",
            )
        })
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        for (name, timeout) in [
            ("KMA", self.kma.timeout_seconds),
            ("Geolocation", self.geolocation.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(WeatherGridError::config(format!(
                    "{name} timeout must be between 1 and 300 seconds"
                ))
                .into());
            }
        }

        if self.defaults.grid_x <= 0 || self.defaults.grid_y <= 0 {
            return Err(
                WeatherGridError::config("Default grid cell must have positive coordinates").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherGridError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherGridError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("KMA base URL", &self.kma.base_url),
            ("Geolocation URL", &self.geolocation.url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherGridError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
