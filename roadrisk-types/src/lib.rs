//! # roadrisk-types
//!
//! Core data types for the roadrisk accident-risk index.
//!
//! This crate provides the plain, serializable types shared between the index
//! and its host applications:
//!
//! - **Record types**: `AccidentRecord`, `RecordId`
//! - **Result types**: `RiskResult`, `AccidentDetail`, `DangerLevel`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives and `chrono`'s civil datetimes.
//!
//! ## Examples
//!
//! ```rust
//! use roadrisk_types::record::AccidentRecord;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
//!     .unwrap()
//!     .and_hms_opt(17, 30, 0)
//!     .unwrap();
//! let record = AccidentRecord::new(1, 44.8125, 20.4612, ts); // Belgrade
//! assert_eq!(record.lat(), 44.8125);
//! ```

pub mod record;
pub mod risk;
