//! Hexagonal geo-cell mapping.
//!
//! Wraps the H3 discrete global grid at one fixed resolution: coordinates map
//! to cells, and cells expand to grid disks for coarse proximity filtering.
//! A disk over-approximates a circle, so callers must always refine
//! candidates by true distance afterwards.

use geo::Point;
use h3o::{CellIndex, LatLng, Resolution};
use smallvec::SmallVec;

use crate::error::{Result, RiskError};

/// H3 resolution used unless configured otherwise; cells are ~0.35 km across.
pub const DEFAULT_RESOLUTION: u8 = 9;

/// Cell width in kilometers assumed when converting a radius to grid rings.
pub const CELL_EDGE_KM: f64 = 0.35;

/// A grid disk. Ring 1 yields seven cells; larger rings spill to the heap.
pub type CellDisk = SmallVec<[CellIndex; 7]>;

/// Maps coordinates onto hexagonal cells at one fixed resolution.
///
/// # Examples
///
/// ```rust
/// use roadrisk::cell::CellGrid;
///
/// let grid = CellGrid::new(9)?;
/// let cell = grid.cell_of(44.8125, 20.4612)?;
/// let disk = grid.disk(cell, 1);
/// assert_eq!(disk.len(), 7);
/// # Ok::<(), roadrisk::RiskError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CellGrid {
    resolution: Resolution,
}

impl CellGrid {
    /// Create a grid at the given H3 resolution (0-15).
    pub fn new(resolution: u8) -> Result<Self> {
        let resolution =
            Resolution::try_from(resolution).map_err(|_| RiskError::InvalidResolution(resolution))?;
        Ok(Self { resolution })
    }

    /// The grid's fixed resolution.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// The cell containing the given coordinate.
    ///
    /// Deterministic for a given grid; fails only when the coordinate is
    /// outside the valid latitude/longitude domain.
    pub fn cell_of(&self, lat: f64, lon: f64) -> Result<CellIndex> {
        let coord = LatLng::new(lat, lon).map_err(|_| RiskError::InvalidCoordinate { lat, lon })?;
        Ok(coord.to_cell(self.resolution))
    }

    /// The cell containing a `geo::Point` (x = lon, y = lat).
    pub fn cell_of_point(&self, point: &Point<f64>) -> Result<CellIndex> {
        self.cell_of(point.y(), point.x())
    }

    /// Every cell within grid distance `k` of `cell`, including `cell`.
    pub fn disk(&self, cell: CellIndex, k: u32) -> CellDisk {
        cell.grid_disk(k)
    }

    /// Rings needed to cover `radius_km`, at least one.
    ///
    /// Hex rings are not circles; the resulting disk may contain points
    /// farther than `radius_km`, which is why distance refinement is
    /// mandatory downstream.
    pub fn rings_for_km(radius_km: f64) -> u32 {
        ((radius_km / CELL_EDGE_KM).ceil() as u32).max(1)
    }
}
