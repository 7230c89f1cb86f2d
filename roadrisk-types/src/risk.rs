use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::RecordId;

/// Discrete danger classification produced by the risk index.
///
/// Levels are ordered from least to most dangerous, so they can be compared
/// directly:
///
/// ```
/// use roadrisk_types::risk::DangerLevel;
///
/// assert!(DangerLevel::Severe > DangerLevel::Moderate);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DangerLevel {
    /// Fewer than two nearby accidents and no temporal clustering.
    #[default]
    Safe,
    /// At least two accidents nearby.
    Moderate,
    /// Five or more nearby, or clustered at this time of day and season.
    Dangerous,
    /// More than ten nearby, or strongly clustered in both cycles.
    Severe,
}

impl DangerLevel {
    /// Classify a query from its match counts.
    ///
    /// The thresholds are evaluated top-down, first match wins:
    ///
    /// | Condition | Level |
    /// |---|---|
    /// | `total > 10` or (`time >= 3` and `season >= 5`) | `Severe` |
    /// | `total >= 5` or (`time >= 2` and `season >= 3`) | `Dangerous` |
    /// | `total >= 2` | `Moderate` |
    /// | otherwise | `Safe` |
    ///
    /// `time_matched` and `season_matched` count the spatial candidates that
    /// also fall inside the time-of-day and seasonal windows, so both are
    /// bounded by `total`.
    pub fn classify(total: usize, time_matched: usize, season_matched: usize) -> Self {
        if total > 10 || (time_matched >= 3 && season_matched >= 5) {
            Self::Severe
        } else if total >= 5 || (time_matched >= 2 && season_matched >= 3) {
            Self::Dangerous
        } else if total >= 2 {
            Self::Moderate
        } else {
            Self::Safe
        }
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Safe => "SAFE",
            Self::Moderate => "MODERATE",
            Self::Dangerous => "DANGEROUS",
            Self::Severe => "SEVERE",
        };
        f.write_str(label)
    }
}

/// Per-candidate diagnostics for one spatial match.
///
/// Emitted only when details are requested; the classification decision never
/// depends on this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentDetail {
    /// The matched record.
    pub id: RecordId,
    /// Geodesic distance from the query position in kilometers.
    pub distance_km: f64,
    /// Absolute civil-time difference between query and accident, in hours.
    pub hours_from_now: f64,
    /// Circular day-of-year distance from the query date, in days.
    pub days_from_seasonal_center: u32,
}

/// The answer to one risk query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RiskResult {
    /// Accidents within the query radius (after geodesic refinement).
    pub total: usize,
    /// Of those, accidents within the time-of-day window.
    pub time_matched: usize,
    /// Of those, accidents within the seasonal window.
    pub season_matched: usize,
    /// Danger classification for the combined counts.
    pub level: DangerLevel,
    /// Optional per-candidate diagnostics, empty unless requested.
    pub details: Vec<AccidentDetail>,
}

impl RiskResult {
    /// The degenerate "no data" answer: zero matches, [`DangerLevel::Safe`].
    pub fn empty() -> Self {
        Self::default()
    }
}
