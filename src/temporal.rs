//! Cyclic temporal indexing.
//!
//! Accident timestamps are projected onto two wrapping key domains: seconds
//! since midnight (24 h cycle) and zero-based day of year (365/366-day
//! cycle). [`CyclicIndex`] stores `(key, id)` pairs sorted by key and answers
//! circular range queries with binary search, splitting a window that
//! straddles the wrap boundary into two contiguous lookups.

use chrono::{Datelike, NaiveDateTime, Timelike};
use roadrisk_types::record::RecordId;
use rustc_hash::FxHashSet;

use crate::error::{Result, RiskError};

/// Cycle length of the time-of-day domain.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds since local midnight for a civil timestamp.
pub fn seconds_since_midnight(ts: &NaiveDateTime) -> u32 {
    ts.num_seconds_from_midnight()
}

/// Zero-based day of year (Jan 1 is 0, Dec 31 is 364 or 365).
pub fn day_of_year(ts: &NaiveDateTime) -> u32 {
    ts.ordinal0()
}

/// Length in days of the timestamp's own year.
pub fn days_in_year(ts: &NaiveDateTime) -> u32 {
    if ts.date().leap_year() { 366 } else { 365 }
}

/// Distance between two keys on a wrapping domain: the smaller of the
/// forward and backward walk.
pub fn circular_distance(a: u32, b: u32, cycle: u32) -> u32 {
    let diff = a.abs_diff(b) % cycle;
    diff.min(cycle - diff)
}

/// An ordered `(key, id)` sequence over a wrapping key domain.
///
/// The index is built once by bulk-sorting all collected entries and is
/// read-only afterwards. Duplicate keys are allowed and ordered arbitrarily
/// among themselves. A query costs `O(log n + m)` for `m` matches.
///
/// The cycle length is a query parameter rather than a field: the seasonal
/// domain wraps at 365 or 366 depending on the query year, while the keys
/// themselves stay fixed.
///
/// # Examples
///
/// ```rust
/// use roadrisk::temporal::{CyclicIndex, SECONDS_PER_DAY};
///
/// // One record at 23:50:00.
/// let index = CyclicIndex::from_entries(vec![(23 * 3600 + 50 * 60, 1)]);
///
/// // A one-hour window around 00:05:00 wraps past midnight and matches.
/// let matched = index.range_query(5 * 60, 3600, SECONDS_PER_DAY)?;
/// assert!(matched.contains(&1));
/// # Ok::<(), roadrisk::RiskError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CyclicIndex {
    entries: Vec<(u32, RecordId)>,
}

impl CyclicIndex {
    /// Build the index by bulk-sorting the collected entries.
    pub fn from_entries(mut entries: Vec<(u32, RecordId)>) -> Self {
        entries.sort_unstable_by_key(|&(key, _)| key);
        Self { entries }
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All ids whose key lies within `window` of `center`, measured on a
    /// circular domain of length `cycle`.
    ///
    /// A window that straddles the wrap boundary is resolved as two
    /// contiguous sub-ranges, one at each end of the domain, unioned
    /// together. A window spanning at least half the cycle matches every
    /// entry.
    ///
    /// # Errors
    ///
    /// `window == 0` and `cycle == 0` are programmer errors and return
    /// [`RiskError::InvalidArgument`].
    pub fn range_query(&self, center: u32, window: u32, cycle: u32) -> Result<FxHashSet<RecordId>> {
        if cycle == 0 {
            return Err(RiskError::invalid_argument("cycle length must be positive"));
        }
        if window == 0 {
            return Err(RiskError::invalid_argument("query window must be positive"));
        }

        let mut matched = FxHashSet::default();
        if self.entries.is_empty() {
            return Ok(matched);
        }

        // The circular distance never exceeds half the cycle.
        if u64::from(window) * 2 >= u64::from(cycle) {
            matched.extend(self.entries.iter().map(|&(_, id)| id));
            return Ok(matched);
        }

        let center = i64::from(center % cycle);
        let cycle = i64::from(cycle);
        let low = center - i64::from(window);
        let high = center + i64::from(window);

        if low >= 0 && high < cycle {
            self.collect_range(low as u32, high as u32, cycle as u32, &mut matched);
        } else if low < 0 {
            self.collect_range((low + cycle) as u32, (cycle - 1) as u32, cycle as u32, &mut matched);
            self.collect_range(0, high as u32, cycle as u32, &mut matched);
        } else {
            self.collect_range(low as u32, (cycle - 1) as u32, cycle as u32, &mut matched);
            self.collect_range(0, (high - cycle) as u32, cycle as u32, &mut matched);
        }

        Ok(matched)
    }

    // Inclusive [low, high]. A range that reaches the top of the cycle reads
    // to the end of the entries, so a leap-day key of 365 still matches when
    // the query year has 365 days.
    fn collect_range(&self, low: u32, high: u32, cycle: u32, out: &mut FxHashSet<RecordId>) {
        let l = self.entries.partition_point(|&(key, _)| key < low);
        let r = if high >= cycle - 1 {
            self.entries.len()
        } else {
            self.entries.partition_point(|&(key, _)| key <= high)
        };
        out.extend(self.entries[l..r].iter().map(|&(_, id)| id));
    }
}
