//! Error types for the roadrisk index.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Errors surfaced by index construction and queries.
///
/// Data-quality problems never show up here: a malformed record is skipped
/// during the build and counted in [`BuildStats`](crate::BuildStats). The
/// variants below are caller-misuse or opt-in conditions and are surfaced
/// immediately, never clamped away.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// A query or configuration parameter is out of its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A query coordinate is outside the valid latitude/longitude range.
    #[error("invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// The configured grid resolution is not a valid H3 resolution.
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(u8),

    /// The record iterator produced no usable records and the builder was
    /// configured with `forbid_empty`.
    #[error("dataset contains no usable records")]
    EmptyDataset,
}

impl RiskError {
    /// Shorthand for an [`InvalidArgument`](Self::InvalidArgument) error.
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
