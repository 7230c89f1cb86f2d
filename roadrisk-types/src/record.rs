use chrono::NaiveDateTime;
use geo::Point;
use serde::{Deserialize, Serialize};

/// Identifier assigned to an accident record by the data loader.
///
/// Identifiers are opaque to the index: they only need to be unique within
/// one dataset. Every internal structure references records by id; the record
/// itself is owned exclusively by the record store.
pub type RecordId = u64;

/// A single historical accident: where and when it happened.
///
/// Records are immutable once constructed. The coordinate is stored as a
/// `geo::Point` in (lon, lat) order; use the [`lat`](Self::lat) and
/// [`lon`](Self::lon) accessors rather than reaching for `x`/`y`.
///
/// # Examples
///
/// ```
/// use roadrisk_types::record::AccidentRecord;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 11, 3)
///     .unwrap()
///     .and_hms_opt(23, 50, 0)
///     .unwrap();
/// let record = AccidentRecord::new(42, 44.8125, 20.4612, ts);
/// assert_eq!(record.lat(), 44.8125);
/// assert_eq!(record.lon(), 20.4612);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    /// Loader-assigned identifier, unique within the dataset.
    pub id: RecordId,
    /// Accident location (longitude/latitude).
    pub point: Point<f64>,
    /// Civil timestamp in the dataset's local calendar.
    pub timestamp: NaiveDateTime,
}

impl AccidentRecord {
    /// Create a record from latitude/longitude in decimal degrees.
    pub fn new(id: RecordId, lat: f64, lon: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            point: Point::new(lon, lat),
            timestamp,
        }
    }

    /// Create a record from an existing point.
    pub fn from_point(id: RecordId, point: Point<f64>, timestamp: NaiveDateTime) -> Self {
        Self {
            id,
            point,
            timestamp,
        }
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    /// Longitude in decimal degrees.
    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// The accident location.
    pub fn point(&self) -> &Point<f64> {
        &self.point
    }

    /// The accident's civil timestamp.
    pub fn timestamp(&self) -> &NaiveDateTime {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_record_accessors() {
        let record = AccidentRecord::new(7, 44.8125, 20.4612, ts(17, 30));
        assert_eq!(record.id, 7);
        assert_eq!(record.lat(), 44.8125);
        assert_eq!(record.lon(), 20.4612);
        assert_eq!(record.point().x(), 20.4612);
        assert_eq!(record.point().y(), 44.8125);
    }

    #[test]
    fn test_record_from_point() {
        let point = Point::new(20.4612, 44.8125);
        let record = AccidentRecord::from_point(3, point, ts(8, 0));
        assert_eq!(record.lat(), 44.8125);
        assert_eq!(record.lon(), 20.4612);
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = AccidentRecord::new(11, 45.2671, 19.8335, ts(6, 45));
        let json = serde_json::to_string(&record).unwrap();
        let back: AccidentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
