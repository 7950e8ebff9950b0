//! # hc-holidays
//!
//! Holiday definitions and the calculation engine that turns a definition
//! plus a year into concrete nominal and observed dates.
//!
//! ```
//! use hc_holidays::{catalog, operations, Locality};
//! use hc_time::Date;
//!
//! let us = Locality::country("US", "United States").unwrap();
//! let good_friday = catalog::good_friday([us]).unwrap();
//! let date = operations::date_only(&good_friday, 2024).unwrap();
//! assert_eq!(date, Date::from_ymd(2024, 3, 29).unwrap());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Calendar` trait and locality-scoped holiday calendars.
pub mod calendar;

/// Ready-made holiday definitions.
pub mod catalog;

/// Holiday variants and their shared details.
pub mod holiday;

/// Holiday classification.
pub mod holiday_type;

/// Named algorithms for moveable holidays.
pub mod known_holiday;

/// Country / subdivision / city hierarchy.
pub mod locality;

/// The calculation engine.
pub mod operations;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{Calendar, HolidayCalendar, HolidayCalendarBuilder, LocalityCalendar, WeekendsOnly};
pub use holiday::{
    FixedHoliday, Holiday, HolidayDetails, MoveableFromBaseHoliday, MoveableHoliday,
    ObservedHoliday,
};
pub use holiday_type::HolidayType;
pub use known_holiday::KnownHoliday;
pub use locality::{City, Country, Locality, Subdivision};
pub use operations::{
    calculate_date, calculate_observed_date, calculate_range, date_only, is_weekend, mondayise,
    observed_date_only, MAX_BASE_DEPTH,
};
