//! `Date` type.
//!
//! Dates are represented as a serial number of days in the proleptic
//! Gregorian calendar.
//!
//! # Serial number convention
//! * Serial 1 = January 1, year 1 (a Monday).
//! * The valid date range is 0001-01-01 to 9999-12-31.

use std::str::FromStr;

use crate::month::Month;
use crate::weekday::Weekday;
use hc_core::errors::{Error, Result};

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Smallest supported year.
    pub const MIN_YEAR: i32 = 1;

    /// Largest supported year.
    pub const MAX_YEAR: i32 = 9999;

    /// Minimum valid date: January 1, 0001.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(3_652_059);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number.
    ///
    /// Returns an error if the serial is outside `[MIN, MAX]`.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::DateOutOfRange(format!(
                "serial {serial} outside [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    ///
    /// # Errors
    /// * `Error::InvalidYear` if `year` is outside `[1, 9999]`.
    /// * `Error::InvalidCalendarDate` if the month or day does not exist.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self> {
        check_year(year)?;
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(Error::InvalidCalendarDate { year, month, day });
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    /// Create a date from year, [`Month`], and day-of-month.
    pub fn from_parts(year: i32, month: Month, day: u8) -> Result<Self> {
        Self::from_ymd(year, month.number(), day)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1–9999).
    pub fn year(&self) -> i32 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the month as a [`Month`].
    pub fn month_of_year(&self) -> Month {
        Month::ALL[usize::from(self.month()) - 1]
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let (y, _, _) = ymd_from_serial(self.0);
        (self.0 - serial_from_ymd(y, 1, 1) + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 0001-01-01 is a Monday
        Weekday::ALL[(self.0 - 1).rem_euclid(7) as usize]
    }

    /// Return `true` if this date falls on a Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days (negative moves backwards).
    ///
    /// Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let serial = self.0.checked_add(n).ok_or_else(|| {
            Error::DateOutOfRange(format!("{self} + {n} days overflows"))
        })?;
        if serial < Self::MIN.0 || serial > Self::MAX.0 {
            return Err(Error::DateOutOfRange(format!(
                "{self} {n:+} days is outside [0001-01-01, 9999-12-31]"
            )));
        }
        Ok(Date(serial))
    }

    /// The following calendar day.
    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }

    /// The preceding calendar day.
    pub fn pred(self) -> Result<Self> {
        self.add_days(-1)
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = ymd_from_serial(self.0);
        Date(serial_from_ymd(y, m, days_in_month(y, m)))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the *n*-th occurrence of `weekday` in `month` of `year`.
    ///
    /// For example, `nth_weekday(4, Weekday::Thursday, 2024, 11)` returns the
    /// fourth Thursday of November 2024 (2024-11-28).
    ///
    /// # Errors
    /// Returns an error if `n` is zero, if the year is out of range, or if the
    /// month has fewer than `n` such weekdays.
    pub fn nth_weekday(n: u8, weekday: Weekday, year: i32, month: u8) -> Result<Self> {
        if n == 0 {
            return Err(Error::Precondition("nth_weekday: n must be >= 1".into()));
        }
        let first = Date::from_ymd(year, month, 1)?;
        let day = 1 + u32::from(first.weekday().days_until(weekday)) + 7 * (u32::from(n) - 1);
        if day > u32::from(days_in_month(year, month)) {
            return Err(Error::Precondition(format!(
                "nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}"
            )));
        }
        Date::from_ymd(year, month, day as u8)
    }

    /// Return the last occurrence of `weekday` in `month` of `year`.
    ///
    /// `last_weekday(Weekday::Monday, 2024, 5)` is Memorial Day 2024
    /// (2024-05-27).
    pub fn last_weekday(weekday: Weekday, year: i32, month: u8) -> Result<Self> {
        let last = Date::from_ymd(year, month, 1)?.end_of_month();
        last.on_or_before(weekday)
    }

    /// Return the latest date not after `self` that falls on `weekday`.
    pub fn on_or_before(self, weekday: Weekday) -> Result<Self> {
        self.add_days(-i32::from(weekday.days_until(self.weekday())))
    }

    /// Return the earliest date not before `self` that falls on `weekday`.
    pub fn on_or_after(self, weekday: Weekday) -> Result<Self> {
        self.add_days(i32::from(self.weekday().days_until(weekday)))
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::Precondition(format!("'{s}' is not a YYYY-MM-DD date"));
        let mut parts = s.splitn(3, '-');
        let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let year: i32 = y.parse().map_err(|_| malformed())?;
        let month: u8 = m.parse().map_err(|_| malformed())?;
        let day: u8 = d.parse().map_err(|_| malformed())?;
        Date::from_ymd(year, month, day)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── chrono interop ────────────────────────────────────────────────────────────

#[cfg(feature = "chrono")]
impl From<Date> for chrono::NaiveDate {
    fn from(date: Date) -> Self {
        // Serial 1 is 0001-01-01, which is chrono's day 1 of the common era.
        chrono::NaiveDate::from_num_days_from_ce_opt(date.0)
            .expect("every Date lies within chrono's supported range")
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for Date {
    type Error = Error;

    fn try_from(value: chrono::NaiveDate) -> Result<Self> {
        use chrono::Datelike;
        Date::from_ymd(value.year(), value.month() as u8, value.day() as u8)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_year(year: i32) -> Result<()> {
    if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
        return Err(Error::InvalidYear(year));
    }
    Ok(())
}

/// Whether a given year is a leap year (proleptic Gregorian rules).
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Convert (year, month, day) to a serial number.
///
/// Serial 1 = 0001-01-01.
fn serial_from_ymd(year: i32, month: u8, day: u8) -> i32 {
    let y = year - 1;
    // Days in whole years before `year`, including their leap days
    let mut serial = y * 365 + y / 4 - y / 100 + y / 400;
    serial += MONTH_OFFSET[month as usize - 1] as i32;
    if month > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial + day as i32
}

/// Decompose a serial number into (year, month, day).
fn ymd_from_serial(serial: i32) -> (i32, u8, u8) {
    // 146 097 days per 400-year cycle; the estimate is off by at most one.
    let mut y = ((serial as i64 - 1) * 400 / 146_097) as i32 + 1;
    loop {
        if serial < serial_from_ymd(y, 1, 1) {
            y -= 1;
        } else if y < Date::MAX_YEAR && serial >= serial_from_ymd(y + 1, 1, 1) {
            y += 1;
        } else {
            break;
        }
    }
    let mut remaining = serial - serial_from_ymd(y, 1, 1) + 1;
    let mut m = 1u8;
    loop {
        let days = days_in_month(y, m) as i32;
        if remaining <= days {
            break;
        }
        remaining -= days;
        m += 1;
    }
    (y, m, remaining as u8)
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ── Tests ─────────────────────────────────────────────────────────────────────
