//! Hex-cell spatial index powering proximity queries.
//!
//! Records are bucketed by the H3 cell of their own coordinates, each id in
//! exactly one bucket. Queries expand a grid disk around the query position
//! (a cheap coarse filter), union the touched buckets, and then refine every
//! candidate by true geodesic distance. The refinement is the
//! correctness-critical step: hex disks over-approximate circles and must
//! never be trusted on their own.

use geo::{Distance, Geodesic, Point};
use h3o::CellIndex;
use roadrisk_types::record::{AccidentRecord, RecordId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cell::CellGrid;
use crate::error::{Result, RiskError};
use crate::store::RecordStore;

/// Geodesic (Karney 2013) distance between two points in kilometers.
pub fn geodesic_km(a: &Point<f64>, b: &Point<f64>) -> f64 {
    Geodesic.distance(*a, *b) / 1000.0
}

/// Cell-bucketed spatial index over accident records.
///
/// Built once from the record store, read-only afterwards. The index holds
/// only record ids; coordinates are fetched from the store during the
/// refinement pass.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    grid: CellGrid,
    buckets: FxHashMap<CellIndex, FxHashSet<RecordId>>,
    len: usize,
}

impl SpatialIndex {
    pub(crate) fn new(grid: CellGrid) -> Self {
        Self {
            grid,
            buckets: FxHashMap::default(),
            len: 0,
        }
    }

    /// Bucket a record under the cell of its own coordinates.
    pub(crate) fn insert(&mut self, record: &AccidentRecord) -> Result<()> {
        let cell = self.grid.cell_of_point(record.point())?;
        if self.buckets.entry(cell).or_default().insert(record.id) {
            self.len += 1;
        }
        Ok(())
    }

    /// Number of indexed record ids.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct cells holding at least one record.
    pub fn cell_count(&self) -> usize {
        self.buckets.len()
    }

    fn validate_radius(radius_km: f64) -> Result<()> {
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(RiskError::invalid_argument(format!(
                "radius_km must be finite and positive, got {radius_km}"
            )));
        }
        Ok(())
    }

    /// All records within `radius_km` of a point.
    ///
    /// Expands a grid disk sized from the radius, unions the touched
    /// buckets, and keeps only candidates whose geodesic distance to the
    /// query point is within the radius.
    ///
    /// # Errors
    ///
    /// A non-positive or non-finite radius is caller misuse and returns
    /// [`RiskError::InvalidArgument`]; an out-of-range coordinate returns
    /// [`RiskError::InvalidCoordinate`].
    pub fn near_point(
        &self,
        store: &RecordStore,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<FxHashSet<RecordId>> {
        Self::validate_radius(radius_km)?;

        let mut matched = FxHashSet::default();
        if self.buckets.is_empty() {
            return Ok(matched);
        }

        let center_cell = self.grid.cell_of(lat, lon)?;
        let rings = CellGrid::rings_for_km(radius_km);
        let center = Point::new(lon, lat);

        for cell in self.grid.disk(center_cell, rings) {
            let Some(bucket) = self.buckets.get(&cell) else {
                continue;
            };
            for &id in bucket {
                let Some(record) = store.get(id) else {
                    continue;
                };
                if geodesic_km(&center, record.point()) <= radius_km {
                    matched.insert(id);
                }
            }
        }

        Ok(matched)
    }

    /// All records within `radius_km` of any waypoint of a route.
    ///
    /// Every waypoint's cell is expanded by `buffer_ring`; the union of the
    /// touched buckets is refined by keeping a candidate if its geodesic
    /// distance to *any* waypoint is within the radius, short-circuiting on
    /// the first match. This models "the route passes near an accident
    /// site", not just "the endpoint does".
    pub fn near_route(
        &self,
        store: &RecordStore,
        route: &[(f64, f64)],
        radius_km: f64,
        buffer_ring: u32,
    ) -> Result<FxHashSet<RecordId>> {
        Self::validate_radius(radius_km)?;
        if route.is_empty() {
            return Err(RiskError::invalid_argument(
                "route must contain at least one waypoint",
            ));
        }

        let mut matched = FxHashSet::default();
        if self.buckets.is_empty() {
            return Ok(matched);
        }

        let mut corridor: FxHashSet<CellIndex> = FxHashSet::default();
        for &(lat, lon) in route {
            let cell = self.grid.cell_of(lat, lon)?;
            corridor.extend(self.grid.disk(cell, buffer_ring));
        }

        let waypoints: Vec<Point<f64>> = route
            .iter()
            .map(|&(lat, lon)| Point::new(lon, lat))
            .collect();

        for cell in &corridor {
            let Some(bucket) = self.buckets.get(cell) else {
                continue;
            };
            for &id in bucket {
                let Some(record) = store.get(id) else {
                    continue;
                };
                let near_any = waypoints
                    .iter()
                    .any(|wp| geodesic_km(record.point(), wp) <= radius_km);
                if near_any {
                    matched.insert(id);
                }
            }
        }

        Ok(matched)
    }
}
