//! Configuration management for `tripframe`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripFrameError;
use crate::viewport::ViewportSize;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripFrameConfig {
    /// Itinerary and hotel service configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Map framing defaults
    #[serde(default)]
    pub map: MapConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// External service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the itinerary service
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u32,
    /// Retries for transient failures
    #[serde(default = "default_api_max_retries")]
    pub max_retries: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long hotel and itinerary results stay fresh, in minutes
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Window size assumed when a caller does not report its map container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_timeout() -> u32 {
    30
}

fn default_api_max_retries() -> u32 {
    1
}

fn default_cache_ttl() -> u32 {
    60
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("tripframe").to_string_lossy().into_owned())
        .unwrap_or_else(|| ".tripframe-cache".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_window_width() -> u32 {
    1200
}

fn default_window_height() -> u32 {
    800
}

fn default_server_port() -> u16 {
    3000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            token: None,
            timeout_seconds: default_api_timeout(),
            max_retries: default_api_max_retries(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl MapConfig {
    /// Map size to use when the caller reports no container size
    #[must_use]
    pub fn fallback_size(&self) -> ViewportSize {
        ViewportSize::fallback(f64::from(self.window_width), f64::from(self.window_height))
    }
}

impl TripFrameConfig {
    /// Load configuration from `config_path`, or the default location when
    /// `None`, then apply `TRIPFRAME_*` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRIPFRAME_API__TOKEN, TRIPFRAME_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("TRIPFRAME")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TripFrameConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripframe").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.api.base_url.is_empty() {
            self.api.base_url = default_api_base_url();
        }
        if self.api.timeout_seconds == 0 {
            self.api.timeout_seconds = default_api_timeout();
        }
        if self.cache.ttl_minutes == 0 {
            self.cache.ttl_minutes = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.map.window_width == 0 {
            self.map.window_width = default_window_width();
        }
        if self.map.window_height == 0 {
            self.map.window_height = default_window_height();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_token()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_token(&self) -> Result<()> {
        if let Some(token) = &self.api.token {
            if token.trim().is_empty() {
                return Err(TripFrameError::config(
                    "API token cannot be empty if provided. Either remove it or provide a valid token.",
                )
                .into());
            }
        }
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.api.timeout_seconds > 300 {
            return Err(TripFrameError::config("API timeout cannot exceed 300 seconds").into());
        }

        if self.api.max_retries > 10 {
            return Err(TripFrameError::config("API max retries cannot exceed 10").into());
        }

        if self.cache.ttl_minutes > 7 * 24 * 60 {
            return Err(
                TripFrameError::config("Cache TTL cannot exceed 10080 minutes (1 week)").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripFrameError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripFrameError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(
                TripFrameError::config("API base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
