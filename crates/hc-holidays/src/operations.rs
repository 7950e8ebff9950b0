//! The calculation engine.
//!
//! Stateless functions that resolve a [`Holiday`] definition for a year.
//! [`calculate_date`] fills in the nominal date; [`calculate_observed_date`]
//! additionally applies the mondayisation rule and returns an
//! [`Holiday::Observed`] value carrying both dates.
//!
//! Every failure is wrapped in `Error::Holiday`, naming the holiday and the
//! year; base-relative holidays add one wrapper per level of the base chain.

use std::ops::RangeInclusive;

use hc_core::errors::{Error, Result};
use hc_core::Year;
use hc_time::{Date, Weekday};
use tracing::{debug, trace};

use crate::holiday::{Holiday, ObservedHoliday};

/// Maximum number of base links followed while resolving one holiday.
pub const MAX_BASE_DEPTH: usize = 8;

/// Move a weekend date to the nearest weekday.
///
/// Saturday becomes the preceding Friday and Sunday the following Monday.
/// Weekdays, and every date when `enabled` is false, are returned unchanged.
pub fn mondayise(date: Date, enabled: bool) -> Date {
    if !enabled {
        return date;
    }
    let adjusted = match date.weekday() {
        Weekday::Saturday => date.pred(),
        Weekday::Sunday => date.succ(),
        _ => Ok(date),
    };
    // 0001-01-01 is a Monday and 9999-12-31 a Friday
    adjusted.expect("weekend dates always have in-range weekday neighbours")
}

/// Resolve `holiday` for `year`, returning a value of the same variant with
/// its date populated.
///
/// * `Fixed`: `day`/`month` in `year`; fails with
///   `Error::InvalidCalendarDate` when that day does not exist (29 February
///   in a non-leap year).
/// * `Moveable`: the known-holiday rule for `year`.
/// * `MoveableFromBase`: the base holiday resolved for `year`, plus the
///   day offset.
/// * `Observed`: the stored nominal month/day moved to `year`, with the
///   observed date recomputed.
///
/// # Errors
/// An `Error::Holiday` wrapping the cause (see [`Error::root_cause`]).
pub fn calculate_date(holiday: &Holiday, year: Year) -> Result<Holiday> {
    let nominal = resolve(holiday, year)?;
    Ok(holiday.with_resolved(nominal))
}

/// Resolve `holiday` for `year` and apply mondayisation when the holiday
/// asks for it.
///
/// The result is always an [`Holiday::Observed`] carrying both the nominal
/// and the observed date, with the input's details and mondayisation flag.
pub fn calculate_observed_date(holiday: &Holiday, year: Year) -> Result<Holiday> {
    let nominal = resolve(holiday, year)?;
    let enabled = holiday.mondayisation();
    let observed = mondayise(nominal, enabled);
    if observed != nominal {
        debug!(
            holiday = holiday.name(),
            %nominal,
            %observed,
            "holiday falls on a weekend, observed on a weekday"
        );
    }
    Ok(Holiday::Observed(ObservedHoliday {
        details: holiday.details().clone(),
        nominal_date: nominal,
        observed_date: observed,
        mondayisation: enabled,
    }))
}

/// Resolve `holiday` for every year in `years`, in order.
///
/// Each element is the result of [`calculate_observed_date`].  Stops at the
/// first failing year.
pub fn calculate_range(holiday: &Holiday, years: RangeInclusive<Year>) -> Result<Vec<Holiday>> {
    years
        .map(|year| calculate_observed_date(holiday, year))
        .collect()
}

/// Return `true` if the nominal date of `holiday` in `year` is a Saturday or
/// Sunday.
pub fn is_weekend(holiday: &Holiday, year: Year) -> Result<bool> {
    Ok(resolve(holiday, year)?.is_weekend())
}

/// The nominal date of `holiday` in `year`.
pub fn date_only(holiday: &Holiday, year: Year) -> Result<Date> {
    resolve(holiday, year)
}

/// The observed date of `holiday` in `year`.
pub fn observed_date_only(holiday: &Holiday, year: Year) -> Result<Date> {
    Ok(mondayise(resolve(holiday, year)?, holiday.mondayisation()))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn resolve(holiday: &Holiday, year: Year) -> Result<Date> {
    if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
        return Err(Error::InvalidYear(year).for_holiday(holiday.name(), year));
    }
    let nominal = nominal_date(holiday, year, 0)?;
    trace!(holiday = holiday.name(), year, date = %nominal, "resolved holiday");
    Ok(nominal)
}

fn nominal_date(holiday: &Holiday, year: Year, depth: usize) -> Result<Date> {
    let date = match holiday {
        Holiday::Fixed(h) => Date::from_parts(year, h.month, h.day),
        Holiday::Observed(h) => Date::from_ymd(
            year,
            h.nominal_date.month(),
            h.nominal_date.day_of_month(),
        ),
        Holiday::Moveable(h) => h.known_holiday.date(year),
        Holiday::MoveableFromBase(_) if depth >= MAX_BASE_DEPTH => Err(Error::BaseChainTooDeep {
            depth: depth + 1,
            max: MAX_BASE_DEPTH,
        }),
        Holiday::MoveableFromBase(h) => nominal_date(&h.base_holiday, year, depth + 1)
            .and_then(|base| base.add_days(h.day_offset)),
    };
    date.map_err(|e| e.for_holiday(holiday.name(), year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayDetails;
    use crate::holiday_type::HolidayType;
    use crate::known_holiday::KnownHoliday;
    use crate::locality::Locality;
    use hc_time::Month;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn details(name: &str) -> HolidayDetails {
        let nz = Locality::country("NZ", "New Zealand").unwrap();
        HolidayDetails::new(name, HolidayType::National, [nz]).unwrap()
    }

    #[test]
    fn mondayise_moves_weekends_only() {
        // 2021-12-25 Saturday, 2022-12-25 Sunday, 2024-12-25 Wednesday
        assert_eq!(mondayise(date(2021, 12, 25), true), date(2021, 12, 24));
        assert_eq!(mondayise(date(2022, 12, 25), true), date(2022, 12, 26));
        assert_eq!(mondayise(date(2024, 12, 25), true), date(2024, 12, 25));
        assert_eq!(mondayise(date(2021, 12, 25), false), date(2021, 12, 25));
        assert_eq!(mondayise(date(2022, 12, 25), false), date(2022, 12, 25));
    }

    #[test]
    fn fixed_keeps_shape() {
        let h = Holiday::fixed(details("Waitangi Day"), 6, Month::February, true).unwrap();
        let resolved = calculate_date(&h, 2024).unwrap();
        assert!(matches!(resolved, Holiday::Fixed(_)));
        assert_eq!(resolved.date(), Some(date(2024, 2, 6)));
        assert_eq!(resolved.name(), "Waitangi Day");
        // The definition itself is untouched
        assert_eq!(h.date(), None);
    }

    #[test]
    fn leap_day_fails_in_common_years() {
        let h = Holiday::fixed(details("Leap Day"), 29, Month::February, false).unwrap();
        let err = calculate_date(&h, 2023).unwrap_err();
        assert_eq!(
            err.root_cause(),
            &Error::InvalidCalendarDate {
                year: 2023,
                month: 2,
                day: 29
            }
        );
        assert!(matches!(err, Error::Holiday { ref name, year: 2023, .. } if name == "Leap Day"));
        assert_eq!(calculate_date(&h, 2024).unwrap().date(), Some(date(2024, 2, 29)));
    }

    #[test]
    fn invalid_years_are_rejected() {
        let h = Holiday::fixed(details("New Year"), 1, Month::January, false).unwrap();
        for year in [0, -1, 10_000] {
            let err = calculate_date(&h, year).unwrap_err();
            assert_eq!(err.root_cause(), &Error::InvalidYear(year));
        }
    }

    #[test]
    fn observed_variant_is_recomputed_for_the_year() {
        let h = Holiday::observed(details("Christmas"), date(2021, 12, 25), true);
        let again = calculate_date(&h, 2022).unwrap();
        assert_eq!(again.date(), Some(date(2022, 12, 25)));
        assert_eq!(again.observed_date(), Some(date(2022, 12, 26)));
        assert_eq!(calculate_date(&again, 2022).unwrap(), again);
    }

    #[test]
    fn observed_result_exposes_both_dates() {
        let h = Holiday::moveable(details("Easter"), KnownHoliday::Easter, true);
        let obs = calculate_observed_date(&h, 2024).unwrap();
        // Easter is a Sunday, so the observed day is Easter Monday
        assert_eq!(obs.date(), Some(date(2024, 3, 31)));
        assert_eq!(obs.observed_date(), Some(date(2024, 4, 1)));
        assert!(obs.mondayisation());

        let plain = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        let obs = calculate_observed_date(&plain, 2024).unwrap();
        assert_eq!(obs.observed_date(), Some(date(2024, 3, 31)));
    }

    #[test]
    fn weekend_and_date_helpers() {
        let h = Holiday::fixed(details("Christmas"), 25, Month::December, true).unwrap();
        assert!(is_weekend(&h, 2021).unwrap());
        assert!(is_weekend(&h, 2022).unwrap());
        assert!(!is_weekend(&h, 2024).unwrap());
        assert_eq!(date_only(&h, 2021).unwrap(), date(2021, 12, 25));
        assert_eq!(observed_date_only(&h, 2021).unwrap(), date(2021, 12, 24));
    }

    #[test]
    fn range_of_years() {
        let h = Holiday::moveable(details("Thanksgiving"), KnownHoliday::ThanksgivingUs, false);
        let all = calculate_range(&h, 2024..=2026).unwrap();
        let dates: Vec<_> = all.iter().filter_map(Holiday::date).collect();
        assert_eq!(dates, vec![date(2024, 11, 28), date(2025, 11, 27), date(2026, 11, 26)]);
        assert!(calculate_range(&h, 2024..=2023).unwrap().is_empty());
    }
}
