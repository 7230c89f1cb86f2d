//! Accident-risk index answering proximity/time-window danger queries over a
//! frozen set of historical traffic-accident records.
//!
//! ```rust
//! use roadrisk::{AccidentRecord, RiskIndex};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 11, 3)
//!     .unwrap()
//!     .and_hms_opt(17, 40, 0)
//!     .unwrap();
//!
//! let index = RiskIndex::build(vec![
//!     AccidentRecord::new(0, 44.8130, 20.4620, ts),
//!     AccidentRecord::new(1, 44.8140, 20.4605, ts),
//! ])?;
//!
//! let result = index.assess(44.8125, 20.4612, ts)?;
//! println!("{} ({} nearby)", result.level, result.total);
//! # Ok::<(), roadrisk::RiskError>(())
//! ```

pub mod builder;
pub mod cell;
pub mod db;
pub mod error;
pub mod index;
pub mod store;
pub mod temporal;
pub mod types;

pub use builder::IndexBuilder;
pub use db::{AssessOptions, RiskIndex};
pub use error::{Result, RiskError};

pub use geo::Point;

pub use cell::{CellGrid, DEFAULT_RESOLUTION};
pub use index::{SpatialIndex, geodesic_km};
pub use store::RecordStore;
pub use temporal::{CyclicIndex, SECONDS_PER_DAY};

pub use types::{BuildStats, Config};

pub use roadrisk_types::record::{AccidentRecord, RecordId};
pub use roadrisk_types::risk::{AccidentDetail, DangerLevel, RiskResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IndexBuilder, Result, RiskError, RiskIndex};

    pub use geo::Point;

    pub use crate::{AssessOptions, BuildStats, Config};

    pub use crate::{AccidentDetail, AccidentRecord, DangerLevel, RecordId, RiskResult};

    pub use chrono::{NaiveDate, NaiveDateTime};
}
