//! Error types for holidaycalc.
//!
//! Every failure in the workspace is reported through the single
//! `thiserror`-derived [`Error`] enum.  Precondition checks use the
//! [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros defined here.

use thiserror::Error;

/// The top-level error type used throughout holidaycalc.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested day does not exist in that month of that year
    /// (e.g. 29 February in a non-leap year).
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidCalendarDate {
        /// Requested year.
        year: i32,
        /// Requested month (1–12).
        month: u8,
        /// Requested day of the month.
        day: u8,
    },

    /// A known-holiday algorithm was asked for a year outside its domain.
    #[error("{algorithm} is not defined for year {year} (valid from {min_year})")]
    CalendarRange {
        /// Name of the algorithm that rejected the year.
        algorithm: String,
        /// The requested year.
        year: i32,
        /// First year the algorithm is defined for.
        min_year: i32,
    },

    /// Year outside the representable range `[1, 9999]`.
    #[error("year {0} out of range [1, 9999]")]
    InvalidYear(i32),

    /// Date arithmetic produced a date outside the representable range.
    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    /// Precondition violated (programmer error).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Malformed country, subdivision, or city.
    #[error("invalid locality: {0}")]
    InvalidLocality(String),

    /// A base-holiday chain is longer than the engine follows.
    #[error("base holiday chain depth {depth} exceeds maximum {max}")]
    BaseChainTooDeep {
        /// Depth reached when the limit was hit.
        depth: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Two definitions with the same name were added to one calendar.
    #[error("duplicate holiday definition: {0}")]
    DuplicateHoliday(String),

    /// A holiday could not be resolved for a year.
    #[error("cannot calculate '{name}' for {year}: {source}")]
    Holiday {
        /// Name of the failing holiday.
        name: String,
        /// Year that was requested.
        year: i32,
        /// Underlying cause.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Return the innermost error, looking through any [`Error::Holiday`]
    /// wrappers added while resolving base-holiday chains.
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::Holiday { source, .. } = current {
            current = source;
        }
        current
    }

    /// Wrap `self` with the name of the holiday and the year being resolved.
    pub fn for_holiday(self, name: impl Into<String>, year: i32) -> Self {
        Error::Holiday {
            name: name.into(),
            year,
            source: Box::new(self),
        }
    }
}

/// Shorthand `Result` type used throughout holidaycalc.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hc_core::{ensure, errors::Error};
/// fn positive(x: i32) -> hc_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Precondition(...))` immediately.
///
/// # Example
/// ```
/// use hc_core::{fail, errors::Error};
/// fn always_err() -> hc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Precondition(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_nested_holiday_errors() {
        let inner = Error::CalendarRange {
            algorithm: "Easter".into(),
            year: 1500,
            min_year: 1583,
        };
        let err = inner
            .clone()
            .for_holiday("Easter Sunday", 1500)
            .for_holiday("Good Friday", 1500);
        assert_eq!(err.root_cause(), &inner);
        let msg = err.to_string();
        assert!(msg.contains("Good Friday"), "{msg}");
        assert!(msg.contains("1500"), "{msg}");
    }

    #[test]
    fn root_cause_of_plain_error_is_itself() {
        let err = Error::InvalidYear(0);
        assert_eq!(err.root_cause(), &err);
    }

    #[test]
    fn invalid_date_message_is_iso_formatted() {
        let err = Error::InvalidCalendarDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(err.to_string(), "invalid calendar date 2023-02-29");
    }
}
