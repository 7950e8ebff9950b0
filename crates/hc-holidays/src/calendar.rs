//! `Calendar` trait and locality-scoped holiday calendars.
//!
//! A calendar knows which dates are business days and can adjust dates
//! according to a [`BusinessDayConvention`].  [`HolidayCalendar`] holds a set
//! of holiday definitions; viewing it from one [`Locality`] through
//! [`HolidayCalendar::for_locality`] gives a [`Calendar`] whose holidays are
//! the observed dates of the definitions that apply there.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use hc_core::errors::{Error, Result};
use hc_core::Year;
use hc_time::{BusinessDayConvention, Date};
use tracing::{debug, trace, warn};

use crate::holiday::Holiday;
use crate::locality::Locality;
use crate::operations::calculate_observed_date;

/// A business-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> Result<bool>;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> Result<bool> {
        Ok(!self.is_business_day(date)?)
    }

    /// Return `true` if `date` is a weekend according to this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        date.is_weekend()
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => {
                let mut d = date;
                while self.is_holiday(d)? {
                    d = d.succ()?;
                }
                Ok(d)
            }
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.adjust(date, BusinessDayConvention::Following)?;
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Preceding => {
                let mut d = date;
                while self.is_holiday(d)? {
                    d = d.pred()?;
                }
                Ok(d)
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.adjust(date, BusinessDayConvention::Preceding)?;
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Nearest => {
                if self.is_business_day(date)? {
                    return Ok(date);
                }
                let fwd = self.adjust(date, BusinessDayConvention::Following)?;
                let bwd = self.adjust(date, BusinessDayConvention::Preceding)?;
                if date.days_between(fwd) <= bwd.days_between(date) {
                    Ok(fwd)
                } else {
                    Ok(bwd)
                }
            }
        }
    }

    /// Advance `date` by `n` business days.
    fn advance_business_days(&self, date: Date, n: i32) -> Result<Date> {
        let step: i32 = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        let mut d = date;
        while remaining > 0 {
            d = d.add_days(step)?;
            if self.is_business_day(d)? {
                remaining -= 1;
            }
        }
        Ok(d)
    }

    /// Count the number of business days between `d1` (exclusive) and `d2`
    /// (inclusive).  Returns a negative number if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> Result<i32> {
        if d1 == d2 {
            return Ok(0);
        }
        let sign = if d2 > d1 { 1 } else { -1 };
        let (start, end) = if d2 > d1 { (d1, d2) } else { (d2, d1) };
        let mut count = 0;
        let mut d = start;
        while d < end {
            d = d.succ()?;
            if self.is_business_day(d)? {
                count += 1;
            }
        }
        Ok(sign * count)
    }

    /// Holidays in the inclusive range `[from, to]`, optionally including
    /// plain weekends.
    fn holiday_list(&self, from: Date, to: Date, include_weekends: bool) -> Result<Vec<Date>> {
        let mut holidays = Vec::new();
        let mut d = from;
        while d <= to {
            if self.is_holiday(d)? && (include_weekends || !self.is_weekend(d)) {
                holidays.push(d);
            }
            if d == to {
                break;
            }
            d = d.succ()?;
        }
        Ok(holidays)
    }
}

/// A calendar that treats only Saturdays and Sundays as non-business days,
/// with no additional holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> Result<bool> {
        Ok(!self.is_weekend(date))
    }
}

// ── HolidayCalendar ───────────────────────────────────────────────────────────

/// An immutable set of holiday definitions with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HolidayCalendarRaw")
)]
pub struct HolidayCalendar {
    name: String,
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Start building a calendar.
    pub fn builder() -> HolidayCalendarBuilder {
        HolidayCalendarBuilder::default()
    }

    /// Calendar name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All definitions, in insertion order.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.name() == name)
    }

    /// Definitions that apply to `locality`: those with at least one locality
    /// containing it.
    pub fn definitions_for<'a>(&'a self, locality: &'a Locality) -> impl Iterator<Item = &'a Holiday> + 'a {
        self.holidays.iter().filter(move |h| h.applies_to(locality))
    }

    /// Observed holidays of `locality` in `year`, sorted by observed date and
    /// then by name.
    ///
    /// Definitions whose rule is not yet in effect in `year` (see
    /// [`Holiday::valid_from`]) are skipped.  Any other failure fails the
    /// query.
    pub fn holidays_in(&self, locality: &Locality, year: Year) -> Result<Vec<Holiday>> {
        if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear(year));
        }
        let mut resolved = self
            .definitions_for(locality)
            .filter(|h| {
                let in_effect = h.valid_from() <= year;
                if !in_effect {
                    trace!(holiday = h.name(), year, valid_from = h.valid_from(), "not yet in effect");
                }
                in_effect
            })
            .map(|h| {
                calculate_observed_date(h, year).map_err(|e| {
                    warn!(calendar = %self.name, %locality, year, error = %e, "holiday calculation failed");
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;
        resolved.sort_by(|a, b| {
            (a.observed_date(), a.name()).cmp(&(b.observed_date(), b.name()))
        });
        Ok(resolved)
    }

    /// Holidays of `locality` observed on `date`.
    ///
    /// Mondayisation can move a holiday across the new year by one day, so on
    /// 31 December and 1 January the neighbouring year is checked as well.
    pub fn holidays_on(&self, locality: &Locality, date: Date) -> Result<Vec<Holiday>> {
        let mut found = Vec::new();
        for year in candidate_years(date) {
            found.extend(
                self.holidays_in(locality, year)?
                    .into_iter()
                    .filter(|h| h.observed_date() == Some(date)),
            );
        }
        Ok(found)
    }

    /// Observed dates of every holiday of `locality` in `year`.
    pub fn observed_dates(&self, locality: &Locality, year: Year) -> Result<BTreeSet<Date>> {
        Ok(self
            .holidays_in(locality, year)?
            .iter()
            .filter_map(Holiday::observed_date)
            .collect())
    }

    /// Return `true` if a holiday of `locality` is observed on `date`.
    pub fn is_holiday(&self, locality: &Locality, date: Date) -> Result<bool> {
        Ok(!self.holidays_on(locality, date)?.is_empty())
    }

    /// View this calendar from `locality`.
    pub fn for_locality(&self, locality: Locality) -> LocalityCalendar<'_> {
        let name = format!("{} ({locality})", self.name);
        LocalityCalendar {
            calendar: self,
            locality,
            name,
        }
    }
}

/// Builder for [`HolidayCalendar`].
#[derive(Debug, Default)]
pub struct HolidayCalendarBuilder {
    name: Option<String>,
    holidays: Vec<Holiday>,
}

impl HolidayCalendarBuilder {
    /// Set the calendar name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one definition.
    pub fn holiday(mut self, holiday: Holiday) -> Self {
        self.holidays.push(holiday);
        self
    }

    /// Add several definitions.
    pub fn holidays(mut self, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        self.holidays.extend(holidays);
        self
    }

    /// Build the calendar.
    ///
    /// # Errors
    /// `Error::DuplicateHoliday` if two definitions share a name.
    pub fn build(self) -> Result<HolidayCalendar> {
        let mut seen = BTreeSet::new();
        for h in &self.holidays {
            if !seen.insert(h.name()) {
                return Err(Error::DuplicateHoliday(h.name().to_string()));
            }
        }
        let name = self.name.unwrap_or_else(|| "Holidays".to_string());
        debug!(calendar = %name, definitions = self.holidays.len(), "built holiday calendar");
        Ok(HolidayCalendar {
            name,
            holidays: self.holidays,
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct HolidayCalendarRaw {
    name: String,
    holidays: Vec<Holiday>,
}

#[cfg(feature = "serde")]
impl TryFrom<HolidayCalendarRaw> for HolidayCalendar {
    type Error = Error;

    fn try_from(raw: HolidayCalendarRaw) -> Result<Self> {
        HolidayCalendar::builder()
            .name(raw.name)
            .holidays(raw.holidays)
            .build()
    }
}

/// A [`HolidayCalendar`] seen from one locality.
#[derive(Debug, Clone)]
pub struct LocalityCalendar<'a> {
    calendar: &'a HolidayCalendar,
    locality: Locality,
    name: String,
}

impl LocalityCalendar<'_> {
    /// The locality holidays are resolved for.
    pub fn locality(&self) -> &Locality {
        &self.locality
    }

    /// Holidays observed in `year`, sorted by observed date.
    pub fn holidays_in(&self, year: Year) -> Result<Vec<Holiday>> {
        self.calendar.holidays_in(&self.locality, year)
    }

    /// `is_business_day` backed by per-year observed dates, so loops over
    /// many dates resolve each year once.
    fn is_business_day_cached(&self, date: Date, cache: &mut ObservedDates) -> Result<bool> {
        if self.is_weekend(date) {
            return Ok(false);
        }
        for year in candidate_years(date) {
            let dates = match cache.entry(year) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => e.insert(self.calendar.observed_dates(&self.locality, year)?),
            };
            if dates.contains(&date) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Calendar for LocalityCalendar<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> Result<bool> {
        if self.is_weekend(date) {
            return Ok(false);
        }
        Ok(!self.calendar.is_holiday(&self.locality, date)?)
    }

    fn advance_business_days(&self, date: Date, n: i32) -> Result<Date> {
        let mut cache = ObservedDates::new();
        let step: i32 = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        let mut d = date;
        while remaining > 0 {
            d = d.add_days(step)?;
            if self.is_business_day_cached(d, &mut cache)? {
                remaining -= 1;
            }
        }
        Ok(d)
    }

    fn business_days_between(&self, d1: Date, d2: Date) -> Result<i32> {
        if d1 == d2 {
            return Ok(0);
        }
        let mut cache = ObservedDates::new();
        let sign = if d2 > d1 { 1 } else { -1 };
        let (start, end) = if d2 > d1 { (d1, d2) } else { (d2, d1) };
        let mut count = 0;
        let mut d = start;
        while d < end {
            d = d.succ()?;
            if self.is_business_day_cached(d, &mut cache)? {
                count += 1;
            }
        }
        Ok(sign * count)
    }

    fn holiday_list(&self, from: Date, to: Date, include_weekends: bool) -> Result<Vec<Date>> {
        let mut cache = ObservedDates::new();
        let mut holidays = Vec::new();
        let mut d = from;
        while d <= to {
            let holiday = !self.is_business_day_cached(d, &mut cache)?;
            if holiday && (include_weekends || !self.is_weekend(d)) {
                holidays.push(d);
            }
            if d == to {
                break;
            }
            d = d.succ()?;
        }
        Ok(holidays)
    }
}

/// Observed holiday dates by year, filled while one query runs.
type ObservedDates = HashMap<Year, BTreeSet<Date>>;

/// Years whose observed holidays can fall on `date`.
fn candidate_years(date: Date) -> Vec<Year> {
    let year = date.year();
    let mut years = vec![year];
    if date.month() == 12 && date.day_of_month() == 31 && year < Date::MAX_YEAR {
        years.push(year + 1);
    }
    if date.month() == 1 && date.day_of_month() == 1 && year > Date::MIN_YEAR {
        years.push(year - 1);
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayDetails;
    use crate::holiday_type::HolidayType;
    use hc_time::Month;

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn us() -> Locality {
        Locality::country("US", "United States").unwrap()
    }

    fn fixed(name: &str, day: u8, month: Month) -> Holiday {
        let details = HolidayDetails::new(name, HolidayType::National, [us()]).unwrap();
        Holiday::fixed(details, day, month, true).unwrap()
    }

    #[test]
    fn weekends_only_saturday() {
        let cal = WeekendsOnly;
        // 2023-09-02 is a Saturday
        assert!(!cal.is_business_day(date(2023, 9, 2)).unwrap());
        assert!(cal.is_business_day(date(2023, 9, 4)).unwrap());
    }

    #[test]
    fn adjust_following_and_preceding() {
        let cal = WeekendsOnly;
        let sat = date(2023, 9, 2);
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Following).unwrap(),
            date(2023, 9, 4)
        );
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Preceding).unwrap(),
            date(2023, 9, 1)
        );
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::Unadjusted).unwrap(),
            sat
        );
    }

    #[test]
    fn adjust_modified_following_stays_in_month() {
        let cal = WeekendsOnly;
        // 2023-09-30 is a Saturday; Following would leave September
        let sat = date(2023, 9, 30);
        assert_eq!(
            cal.adjust(sat, BusinessDayConvention::ModifiedFollowing).unwrap(),
            date(2023, 9, 29)
        );
        // 2023-07-01 is a Saturday; Preceding would leave July
        assert_eq!(
            cal.adjust(date(2023, 7, 1), BusinessDayConvention::ModifiedPreceding)
                .unwrap(),
            date(2023, 7, 3)
        );
    }

    #[test]
    fn adjust_nearest() {
        let cal = WeekendsOnly;
        // Saturday is one day from Friday, two from Monday
        assert_eq!(
            cal.adjust(date(2023, 9, 2), BusinessDayConvention::Nearest).unwrap(),
            date(2023, 9, 1)
        );
        // Sunday is one day from Monday
        assert_eq!(
            cal.adjust(date(2023, 9, 3), BusinessDayConvention::Nearest).unwrap(),
            date(2023, 9, 4)
        );
    }

    #[test]
    fn business_days_between() {
        let cal = WeekendsOnly;
        let d1 = date(2023, 9, 4); // Monday
        let d2 = date(2023, 9, 8); // Friday
        // Tue, Wed, Thu, Fri = 4 business days (d1 exclusive)
        assert_eq!(cal.business_days_between(d1, d2).unwrap(), 4);
        assert_eq!(cal.business_days_between(d2, d1).unwrap(), -4);
        assert_eq!(cal.advance_business_days(d2, 1).unwrap(), date(2023, 9, 11));
        assert_eq!(cal.advance_business_days(d1, -1).unwrap(), date(2023, 9, 1));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = HolidayCalendar::builder()
            .holiday(fixed("Christmas Day", 25, Month::December))
            .holiday(fixed("Christmas Day", 26, Month::December))
            .build()
            .unwrap_err();
        assert_eq!(err, Error::DuplicateHoliday("Christmas Day".into()));
    }

    #[test]
    fn new_year_observed_in_previous_year() {
        // 2022-01-01 is a Saturday, observed on Friday 2021-12-31
        let cal = HolidayCalendar::builder()
            .name("Test")
            .holiday(fixed("New Year's Day", 1, Month::January))
            .build()
            .unwrap();
        assert!(cal.is_holiday(&us(), date(2021, 12, 31)).unwrap());
        assert!(!cal.is_holiday(&us(), date(2022, 1, 1)).unwrap());
        // 2023-01-01 is a Sunday, observed on Monday 2023-01-02
        assert!(cal.is_holiday(&us(), date(2023, 1, 2)).unwrap());

        let local = cal.for_locality(us());
        assert_eq!(local.name(), "Test (US)");
        assert!(!local.is_business_day(date(2021, 12, 31)).unwrap());
        assert_eq!(
            local
                .adjust(date(2021, 12, 31), BusinessDayConvention::Following)
                .unwrap(),
            date(2022, 1, 3)
        );
    }

    #[test]
    fn holiday_list_excludes_weekends_on_request() {
        let cal = HolidayCalendar::builder()
            .holiday(fixed("Christmas Day", 25, Month::December))
            .build()
            .unwrap();
        let local = cal.for_locality(us());
        let from = date(2022, 12, 20);
        let to = date(2022, 12, 31);
        // Christmas 2022 is a Sunday, observed Monday the 26th
        assert_eq!(local.holiday_list(from, to, false).unwrap(), vec![date(2022, 12, 26)]);
        // Saturday 24th, Sunday 25th, Monday 26th, Saturday 31st
        assert_eq!(local.holiday_list(from, to, true).unwrap().len(), 4);
    }

    #[test]
    fn lookup_by_name_and_observed_dates() {
        let cal = HolidayCalendar::builder()
            .holiday(fixed("Christmas Day", 25, Month::December))
            .holiday(fixed("Boxing Day", 26, Month::December))
            .build()
            .unwrap();
        let boxing = cal.get("Boxing Day").unwrap();
        assert_eq!(boxing.name(), "Boxing Day");
        assert!(matches!(boxing, Holiday::Fixed(_)));
        assert!(cal.get("Easter Monday").is_none());

        // 2021: Saturday 25th observed Friday 24th, Sunday 26th observed Monday 27th
        let dates: Vec<Date> = cal.observed_dates(&us(), 2021).unwrap().into_iter().collect();
        assert_eq!(dates, vec![date(2021, 12, 24), date(2021, 12, 27)]);
        let nz = Locality::country("NZ", "New Zealand").unwrap();
        assert!(cal.observed_dates(&nz, 2021).unwrap().is_empty());
    }

    #[test]
    fn invalid_year_is_rejected() {
        let cal = HolidayCalendar::builder()
            .holiday(fixed("Christmas Day", 25, Month::December))
            .build()
            .unwrap();
        assert_eq!(cal.holidays_in(&us(), 0), Err(Error::InvalidYear(0)));
    }
}
