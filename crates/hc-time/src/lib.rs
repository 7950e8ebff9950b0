//! # hc-time
//!
//! Date, month, weekday, and business-day-convention types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// `Date` type.
pub mod date;

/// `Month`: month of the year.
pub mod month;

/// `Weekday`: day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use date::Date;
pub use month::Month;
pub use weekday::Weekday;
