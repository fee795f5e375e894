//! Configuration management for the hub-and-spoke planner
//!
//! Handles loading configuration from files and environment variables,
//! resolves the ranking service credential, and validates all settings.

use crate::HubSpokeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variables consulted for the ranking credential when the
/// config file and `HUBSPOKE_RANKING__API_KEY` leave it unset.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubSpokeConfig {
    /// Ranking service configuration
    #[serde(default)]
    pub ranking: RankingConfig,
    /// Map canvas and animation configuration
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ranking service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Access credential for the ranking service
    pub api_key: Option<String>,
    /// Base URL of the generative language API
    #[serde(default = "default_ranking_base_url")]
    pub base_url: String,
    /// Model used to produce the ranking
    #[serde(default = "default_ranking_model")]
    pub model: String,
    /// Sampling temperature sent with each request
    #[serde(default = "default_ranking_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds, 0 keeps the transport default
    #[serde(default = "default_ranking_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of ranked hotels kept from one response
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

/// Map canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Logical canvas width
    #[serde(default = "default_map_width")]
    pub width: f64,
    /// Logical canvas height
    #[serde(default = "default_map_height")]
    pub height: f64,
    /// Pixel inset on every side of the canvas
    #[serde(default = "default_map_margin")]
    pub margin_px: f64,
    /// Fraction of each axis span added as padding around the bounding box
    #[serde(default = "default_padding_fraction")]
    pub padding_fraction: f64,
    /// Time for a spoke marker to travel from hotel to anchor
    #[serde(default = "default_spoke_duration")]
    pub spoke_duration_ms: u64,
    /// Interval between published marker positions
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
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

// Default value functions
fn default_ranking_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_ranking_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_ranking_temperature() -> f32 {
    0.2
}

fn default_ranking_timeout() -> u32 {
    60
}

fn default_max_results() -> u32 {
    6
}

fn default_map_width() -> f64 {
    800.0
}

fn default_map_height() -> f64 {
    600.0
}

fn default_map_margin() -> f64 {
    50.0
}

fn default_padding_fraction() -> f64 {
    0.1
}

fn default_spoke_duration() -> u64 {
    2000
}

fn default_frame_interval() -> u64 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ranking_base_url(),
            model: default_ranking_model(),
            temperature: default_ranking_temperature(),
            timeout_seconds: default_ranking_timeout(),
            max_results: default_max_results(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: default_map_width(),
            height: default_map_height(),
            margin_px: default_map_margin(),
            padding_fraction: default_padding_fraction(),
            spoke_duration_ms: default_spoke_duration(),
            frame_interval_ms: default_frame_interval(),
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

impl HubSpokeConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
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

        // HUBSPOKE_RANKING__API_KEY -> ranking.api_key
        builder = builder.add_source(
            Environment::with_prefix("HUBSPOKE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: HubSpokeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.resolve_credential(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hubspoke").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.ranking.base_url.is_empty() {
            self.ranking.base_url = default_ranking_base_url();
        }
        if self.ranking.model.is_empty() {
            self.ranking.model = default_ranking_model();
        }
        if self.ranking.max_results == 0 {
            self.ranking.max_results = default_max_results();
        }
        if self.map.spoke_duration_ms == 0 {
            self.map.spoke_duration_ms = default_spoke_duration();
        }
        if self.map.frame_interval_ms == 0 {
            self.map.frame_interval_ms = default_frame_interval();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.ranking.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            self.ranking.api_key = None;
        }
    }

    /// Fill a missing credential from the fallback environment variables.
    ///
    /// The lookup is injected so tests never touch the process environment.
    pub fn resolve_credential<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.ranking.api_key.is_some() {
            return;
        }
        self.ranking.api_key = CREDENTIAL_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_ranking()?;
        self.validate_map()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_ranking(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.ranking.temperature) {
            return Err(
                HubSpokeError::config("Ranking temperature must be between 0.0 and 2.0").into(),
            );
        }

        if self.ranking.timeout_seconds > 300 {
            return Err(
                HubSpokeError::config("Ranking request timeout cannot exceed 300 seconds").into(),
            );
        }

        if !(1..=20).contains(&self.ranking.max_results) {
            return Err(HubSpokeError::config("Maximum results must be between 1 and 20").into());
        }

        if !self.ranking.base_url.starts_with("http://")
            && !self.ranking.base_url.starts_with("https://")
        {
            return Err(HubSpokeError::config(
                "Ranking base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    fn validate_map(&self) -> Result<()> {
        let map = &self.map;
        if map.margin_px < 0.0 || map.width <= 2.0 * map.margin_px || map.height <= 2.0 * map.margin_px
        {
            return Err(HubSpokeError::config(format!(
                "Canvas {}x{} is too small for a {}px margin",
                map.width, map.height, map.margin_px
            ))
            .into());
        }

        if !(0.0..=1.0).contains(&map.padding_fraction) {
            return Err(
                HubSpokeError::config("Map padding fraction must be between 0.0 and 1.0").into(),
            );
        }

        if map.frame_interval_ms > map.spoke_duration_ms {
            return Err(HubSpokeError::config(
                "Frame interval cannot be longer than the spoke animation",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HubSpokeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HubSpokeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
