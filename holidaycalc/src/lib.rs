//! # holidaycalc
//!
//! Holiday date calculation for fixed, moveable, and base-relative holidays,
//! with optional mondayisation of weekend dates.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `hc-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! holidaycalc = "0.1"
//! ```
//!
//! ```rust
//! use holidaycalc::holidays::{calculate_observed_date, catalog, Locality};
//! use holidaycalc::time::Date;
//!
//! let gb = Locality::country("GB", "United Kingdom")?;
//! let boxing_day = catalog::boxing_day([gb])?;
//!
//! // Sunday 26 December 2021 was observed on Monday the 27th
//! let observed = calculate_observed_date(&boxing_day, 2021)?;
//! assert_eq!(observed.date(), Some(Date::from_ymd(2021, 12, 26)?));
//! assert_eq!(observed.observed_date(), Some(Date::from_ymd(2021, 12, 27)?));
//! # Ok::<(), holidaycalc::core::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! * `serde`: `Serialize`/`Deserialize` for dates, localities, holidays and
//!   calendars.
//! * `chrono`: conversions between [`time::Date`] and `chrono::NaiveDate`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error type and shared aliases.
pub use hc_core as core;

/// Date, month, weekday, and business-day-convention types.
pub use hc_time as time;

/// Holiday definitions, the calculation engine, and calendars.
pub use hc_holidays as holidays;
