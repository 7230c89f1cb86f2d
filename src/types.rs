//! Configuration and statistics types for the roadrisk index.
//!
//! This module provides streamlined, serializable types for configuring the
//! index build and reporting what the build did.

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::cell::DEFAULT_RESOLUTION;

/// Index configuration.
///
/// This configuration is designed to be easily serializable and loadable
/// from JSON, TOML, or other formats while keeping complexity minimal. All
/// values have sensible defaults matching the reference dataset (urban
/// accident records indexed at H3 resolution 9, ~0.35 km cells).
///
/// # Example
///
/// ```rust
/// use roadrisk::Config;
///
/// // Create default config
/// let config = Config::default();
/// assert_eq!(config.resolution, 9);
///
/// // Load from JSON
/// let json = r#"{
///     "time_window_secs": 1800,
///     "season_window_days": 14
/// }"#;
/// let config: Config = Config::from_json(json).unwrap();
/// assert_eq!(config.season_window_days, 14);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// H3 resolution for the geo-cell grid (0-15, default: 9).
    /// One constant for the whole index; higher values mean smaller cells.
    #[serde(default = "Config::default_resolution")]
    pub resolution: u8,

    /// Half-width of the time-of-day window in seconds (default: 3600).
    #[serde(default = "Config::default_time_window_secs")]
    pub time_window_secs: u32,

    /// Half-width of the seasonal window in days (default: 30).
    #[serde(default = "Config::default_season_window_days")]
    pub season_window_days: u32,

    /// Grid-disk ring applied around each route waypoint (default: 1).
    #[serde(default = "Config::default_route_buffer_ring")]
    pub route_buffer_ring: u32,

    /// Radius in kilometers used by `assess` when none is supplied
    /// (default: 5.0).
    #[serde(default = "Config::default_radius_km")]
    pub default_radius_km: f64,
}

impl Config {
    const fn default_resolution() -> u8 {
        DEFAULT_RESOLUTION
    }

    const fn default_time_window_secs() -> u32 {
        3600
    }

    const fn default_season_window_days() -> u32 {
        30
    }

    const fn default_route_buffer_ring() -> u32 {
        1
    }

    const fn default_radius_km() -> f64 {
        5.0
    }

    /// Set the grid resolution.
    pub fn with_resolution(mut self, resolution: u8) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the time-of-day window half-width in seconds.
    pub fn with_time_window_secs(mut self, secs: u32) -> Self {
        self.time_window_secs = secs;
        self
    }

    /// Set the seasonal window half-width in days.
    pub fn with_season_window_days(mut self, days: u32) -> Self {
        self.season_window_days = days;
        self
    }

    /// Set the route buffer ring.
    pub fn with_route_buffer_ring(mut self, ring: u32) -> Self {
        self.route_buffer_ring = ring;
        self
    }

    /// Set the default query radius in kilometers.
    pub fn with_default_radius_km(mut self, radius_km: f64) -> Self {
        self.default_radius_km = radius_km;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution > 15 {
            return Err("Resolution must be between 0 and 15".to_string());
        }

        if self.time_window_secs == 0 {
            return Err("Time-of-day window must be greater than zero".to_string());
        }

        if self.season_window_days == 0 {
            return Err("Seasonal window must be greater than zero".to_string());
        }

        if self.route_buffer_ring == 0 {
            return Err("Route buffer ring must be greater than zero".to_string());
        }

        if !self.default_radius_km.is_finite() || self.default_radius_km <= 0.0 {
            return Err("Default radius must be finite and positive".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            time_window_secs: Self::default_time_window_secs(),
            season_window_days: Self::default_season_window_days(),
            route_buffer_ring: Self::default_route_buffer_ring(),
            default_radius_km: Self::default_radius_km(),
        }
    }
}

/// What one index build did.
///
/// Malformed records (non-finite or out-of-range coordinates) are skipped
/// during the build rather than failing it; `skipped` reports how many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Records accepted into the index.
    pub records: usize,
    /// Records skipped as malformed.
    pub skipped: usize,
    /// Distinct geo-cells holding at least one record.
    pub cells: usize,
}

impl BuildStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}
