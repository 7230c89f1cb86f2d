//! Index builder for flexible configuration.
//!
//! This module provides a builder pattern for constructing a [`RiskIndex`]
//! with advanced configuration options, including the strict empty-dataset
//! mode.

use roadrisk_types::record::AccidentRecord;

use crate::db::RiskIndex;
use crate::error::{Result, RiskError};
use crate::types::Config;

/// Builder for index configuration.
///
/// # Examples
///
/// ```rust
/// use roadrisk::{AccidentRecord, RiskIndex};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), roadrisk::RiskError> {
/// let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
///     .unwrap()
///     .and_hms_opt(17, 30, 0)
///     .unwrap();
///
/// let index = RiskIndex::builder()
///     .resolution(8)
///     .default_radius_km(2.0)
///     .build(vec![AccidentRecord::new(0, 44.8125, 20.4612, ts)])?;
///
/// assert_eq!(index.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct IndexBuilder {
    config: Config,
    forbid_empty: bool,
}

impl IndexBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full configuration at once.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the H3 grid resolution (0-15).
    pub fn resolution(mut self, resolution: u8) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Set the time-of-day window half-width in seconds.
    pub fn time_window_secs(mut self, secs: u32) -> Self {
        self.config.time_window_secs = secs;
        self
    }

    /// Set the seasonal window half-width in days.
    pub fn season_window_days(mut self, days: u32) -> Self {
        self.config.season_window_days = days;
        self
    }

    /// Set the grid-disk ring applied around route waypoints.
    pub fn route_buffer_ring(mut self, ring: u32) -> Self {
        self.config.route_buffer_ring = ring;
        self
    }

    /// Set the radius used by `assess` when none is supplied.
    pub fn default_radius_km(mut self, radius_km: f64) -> Self {
        self.config.default_radius_km = radius_km;
        self
    }

    /// Fail the build with [`RiskError::EmptyDataset`] when no usable record
    /// survives, instead of producing the degenerate always-safe index.
    pub fn forbid_empty(mut self) -> Self {
        self.forbid_empty = true;
        self
    }

    /// Build the index from the record set.
    pub fn build<I>(self, records: I) -> Result<RiskIndex>
    where
        I: IntoIterator<Item = AccidentRecord>,
    {
        let index = RiskIndex::build_with_config(records, self.config)?;
        if self.forbid_empty && index.is_empty() {
            return Err(RiskError::EmptyDataset);
        }
        Ok(index)
    }
}
