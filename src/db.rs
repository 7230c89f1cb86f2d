//! Core risk-index implementation.
//!
//! This module defines the main `RiskIndex` type: the frozen combination of
//! record store, hex-cell spatial index, and the two cyclic temporal indices,
//! plus the query engine that composes them into a danger classification.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use geo::Point;
use roadrisk_types::record::{AccidentRecord, RecordId};
use roadrisk_types::risk::{AccidentDetail, DangerLevel, RiskResult};
use rustc_hash::FxHashSet;

use crate::builder::IndexBuilder;
use crate::cell::CellGrid;
use crate::error::{Result, RiskError};
use crate::index::{SpatialIndex, geodesic_km};
use crate::store::RecordStore;
use crate::temporal::{self, CyclicIndex, SECONDS_PER_DAY};
use crate::types::{BuildStats, Config};

/// Options for a single risk query.
///
/// # Examples
///
/// ```rust
/// use roadrisk::AssessOptions;
///
/// let opts = AssessOptions::new()
///     .with_radius_km(2.5)
///     .with_details();
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssessOptions {
    /// Route waypoints as (lat, lon) pairs; when present and non-empty the
    /// spatial candidates come from the route corridor instead of the
    /// query point.
    pub route: Option<Vec<(f64, f64)>>,
    /// Query radius in kilometers; falls back to the configured default.
    pub radius_km: Option<f64>,
    /// Emit the per-candidate detail list.
    pub details: bool,
}

impl AssessOptions {
    /// Create default options: point query, configured radius, no details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assess along a route corridor instead of around the query point.
    pub fn with_route(mut self, route: Vec<(f64, f64)>) -> Self {
        self.route = Some(route);
        self
    }

    /// Override the query radius in kilometers.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    /// Request the per-candidate detail list.
    pub fn with_details(mut self) -> Self {
        self.details = true;
        self
    }
}

/// Frozen accident-risk index answering "how dangerous is this place, at
/// this time, historically?".
///
/// The index is built once from the full record set and is read-only
/// afterwards; rebuilding the dataset means constructing a new `RiskIndex`.
/// Because nothing mutates after the build, any number of concurrent readers
/// can share one instance without locking, and queries are pure in-memory
/// computation cheap enough to call once per animation frame.
///
/// # Examples
///
/// ```rust
/// use roadrisk::{AccidentRecord, DangerLevel, RiskIndex};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), roadrisk::RiskError> {
/// let ts = NaiveDate::from_ymd_opt(2024, 11, 3)
///     .unwrap()
///     .and_hms_opt(17, 40, 0)
///     .unwrap();
///
/// let index = RiskIndex::build(vec![
///     AccidentRecord::new(0, 44.8130, 20.4620, ts),
///     AccidentRecord::new(1, 44.8140, 20.4605, ts),
/// ])?;
///
/// let result = index.assess(44.8125, 20.4612, ts)?;
/// assert_eq!(result.total, 2);
/// assert_eq!(result.level, DangerLevel::Moderate);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RiskIndex {
    store: RecordStore,
    spatial: SpatialIndex,
    time_of_day: CyclicIndex,
    season: CyclicIndex,
    config: Config,
    stats: BuildStats,
}

impl RiskIndex {
    /// Build an index from a record set with the default configuration.
    ///
    /// Malformed records (out-of-range or non-finite coordinates) are
    /// skipped and counted in [`stats`](Self::stats), never fatal to the
    /// build. An empty record set produces a degenerate index whose queries
    /// all answer [`DangerLevel::Safe`]; use
    /// [`IndexBuilder::forbid_empty`] to surface that as an error instead.
    pub fn build<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = AccidentRecord>,
    {
        Self::build_with_config(records, Config::default())
    }

    /// Build an index from a record set with a custom configuration.
    pub fn build_with_config<I>(records: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = AccidentRecord>,
    {
        config.validate().map_err(RiskError::InvalidArgument)?;
        let grid = CellGrid::new(config.resolution)?;

        let mut store = RecordStore::new();
        let mut spatial = SpatialIndex::new(grid);
        let mut time_entries = Vec::new();
        let mut season_entries = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            match spatial.insert(&record) {
                Ok(()) => {}
                Err(RiskError::InvalidCoordinate { lat, lon }) => {
                    log::warn!(
                        "skipping record {} with invalid coordinate ({lat}, {lon})",
                        record.id
                    );
                    skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            }

            time_entries.push((
                temporal::seconds_since_midnight(record.timestamp()),
                record.id,
            ));
            season_entries.push((temporal::day_of_year(record.timestamp()), record.id));
            store.insert(record);
        }

        let stats = BuildStats {
            records: store.len(),
            skipped,
            cells: spatial.cell_count(),
        };
        log::info!(
            "risk index built: {} records, {} skipped, {} cells",
            stats.records,
            stats.skipped,
            stats.cells
        );

        Ok(Self {
            store,
            spatial,
            time_of_day: CyclicIndex::from_entries(time_entries),
            season: CyclicIndex::from_entries(season_entries),
            config,
            stats,
        })
    }

    /// Create an index builder for advanced configuration.
    pub fn builder() -> IndexBuilder {
        IndexBuilder::new()
    }

    /// What the build accepted and skipped.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// The configuration the index was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Look up a record by id.
    pub fn record(&self, id: RecordId) -> Option<&AccidentRecord> {
        self.store.get(id)
    }

    /// Assess the danger around a point at a civil time, using the
    /// configured default radius and no route.
    pub fn assess(&self, lat: f64, lon: f64, at: NaiveDateTime) -> Result<RiskResult> {
        self.assess_with(lat, lon, at, &AssessOptions::default())
    }

    /// Assess the danger around a point (or along a route) at a civil time.
    ///
    /// The spatial candidates come from the route corridor when
    /// [`AssessOptions::route`] is present and non-empty, otherwise from a
    /// radius query around (`lat`, `lon`). Candidates are then intersected
    /// with the time-of-day window (same time of day on any date) and the
    /// seasonal window (same part of the year, wrapping at the length of the
    /// *query* year), and the three counts are classified by
    /// [`DangerLevel::classify`].
    ///
    /// On an empty index every query answers `total = 0`,
    /// [`DangerLevel::Safe`] — never an error, so a live simulation loop is
    /// not interrupted by "no data yet".
    pub fn assess_with(
        &self,
        lat: f64,
        lon: f64,
        at: NaiveDateTime,
        opts: &AssessOptions,
    ) -> Result<RiskResult> {
        let radius_km = opts.radius_km.unwrap_or(self.config.default_radius_km);

        let spatial_ids = match opts.route.as_deref() {
            Some(route) if !route.is_empty() => self.spatial.near_route(
                &self.store,
                route,
                radius_km,
                self.config.route_buffer_ring,
            )?,
            _ => self.spatial.near_point(&self.store, lat, lon, radius_km)?,
        };
        let total = spatial_ids.len();

        let time_ids = self.time_of_day.range_query(
            temporal::seconds_since_midnight(&at),
            self.config.time_window_secs,
            SECONDS_PER_DAY,
        )?;
        // The seasonal cycle wraps at the query year's own length; cross
        // year-length comparisons near Feb 29 may be off by one day.
        let year_len = temporal::days_in_year(&at);
        let season_ids = self.season.range_query(
            temporal::day_of_year(&at),
            self.config.season_window_days,
            year_len,
        )?;

        let time_matched = spatial_ids.intersection(&time_ids).count();
        let season_matched = spatial_ids.intersection(&season_ids).count();

        let details = if opts.details {
            self.collect_details(&spatial_ids, lat, lon, &at, year_len)
        } else {
            Vec::new()
        };

        Ok(RiskResult {
            total,
            time_matched,
            season_matched,
            level: DangerLevel::classify(total, time_matched, season_matched),
            details,
        })
    }

    // Diagnostics only; classification never reads this list.
    fn collect_details(
        &self,
        ids: &FxHashSet<RecordId>,
        lat: f64,
        lon: f64,
        at: &NaiveDateTime,
        year_len: u32,
    ) -> Vec<AccidentDetail> {
        let center = Point::new(lon, lat);
        let query_day = temporal::day_of_year(at);

        let mut details: Vec<AccidentDetail> = ids
            .iter()
            .filter_map(|&id| {
                let record = self.store.get(id)?;
                let seconds = at.signed_duration_since(*record.timestamp()).num_seconds();
                Some(AccidentDetail {
                    id,
                    distance_km: geodesic_km(&center, record.point()),
                    hours_from_now: seconds.abs() as f64 / 3600.0,
                    days_from_seasonal_center: temporal::circular_distance(
                        query_day,
                        temporal::day_of_year(record.timestamp()),
                        year_len,
                    ),
                })
            })
            .collect();

        details.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });
        details
    }
}
