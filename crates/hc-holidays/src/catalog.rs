//! Ready-made holiday definitions.
//!
//! Every definition here is built from the ordinary holiday variants: fixed
//! dates, [`KnownHoliday`] rules, and offsets from Easter Sunday.  Each
//! function takes the localities the holiday should apply to.

use hc_core::errors::Result;
use hc_time::Month;

use crate::calendar::HolidayCalendar;
use crate::holiday::{Holiday, HolidayDetails};
use crate::holiday_type::HolidayType;
use crate::known_holiday::KnownHoliday;
use crate::locality::Locality;

fn fixed(
    name: &str,
    day: u8,
    month: Month,
    holiday_type: HolidayType,
    localities: impl IntoIterator<Item = Locality>,
) -> Result<Holiday> {
    let details = HolidayDetails::new(name, holiday_type, localities)?;
    Holiday::fixed(details, day, month, true)
}

fn moveable(
    name: &str,
    known_holiday: KnownHoliday,
    localities: impl IntoIterator<Item = Locality>,
) -> Result<Holiday> {
    let details = HolidayDetails::new(name, HolidayType::National, localities)?;
    Ok(Holiday::moveable(details, known_holiday, false))
}

fn easter_offset(
    name: &str,
    day_offset: i32,
    localities: impl IntoIterator<Item = Locality>,
) -> Result<Holiday> {
    let localities: Vec<Locality> = localities.into_iter().collect();
    let base = easter_sunday(localities.clone())?;
    let details = HolidayDetails::new(name, HolidayType::Religious, localities)?;
    Holiday::moveable_from_base(details, KnownHoliday::Easter, base, day_offset, false)
}

// ── Fixed dates ───────────────────────────────────────────────────────────────

/// New Year's Day, 1 January (mondayised).
pub fn new_years_day(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    fixed("New Year's Day", 1, Month::January, HolidayType::National, localities)
}

/// Christmas Day, 25 December (mondayised).
pub fn christmas_day(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    fixed("Christmas Day", 25, Month::December, HolidayType::National, localities)
}

/// Boxing Day, 26 December (mondayised).
pub fn boxing_day(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    fixed("Boxing Day", 26, Month::December, HolidayType::National, localities)
}

/// US Independence Day, 4 July (mondayised).
pub fn independence_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    fixed("Independence Day", 4, Month::July, HolidayType::National, localities)
}

/// US Veterans Day, 11 November (mondayised).
pub fn veterans_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    fixed("Veterans Day", 11, Month::November, HolidayType::National, localities)
}

// ── Easter cycle ──────────────────────────────────────────────────────────────

/// Easter Sunday.
pub fn easter_sunday(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    let details = HolidayDetails::new("Easter Sunday", HolidayType::Religious, localities)?;
    Ok(Holiday::moveable(details, KnownHoliday::Easter, false))
}

/// Palm Sunday, a week before Easter.
pub fn palm_sunday(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    easter_offset("Palm Sunday", -7, localities)
}

/// Good Friday, two days before Easter.
pub fn good_friday(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    easter_offset("Good Friday", -2, localities)
}

/// Easter Monday.
pub fn easter_monday(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    easter_offset("Easter Monday", 1, localities)
}

/// Ascension Day, the 40th day of Easter (a Thursday).
pub fn ascension_day(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    easter_offset("Ascension Day", 39, localities)
}

/// Whit Monday, the day after Pentecost.
pub fn whit_monday(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    easter_offset("Whit Monday", 50, localities)
}

// ── Weekday rules ─────────────────────────────────────────────────────────────

/// Birthday of Martin Luther King, Jr.
pub fn martin_luther_king_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Martin Luther King Jr. Day", KnownHoliday::MartinLutherKingDayUs, localities)
}

/// Washington's Birthday.
pub fn presidents_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Presidents' Day", KnownHoliday::PresidentsDayUs, localities)
}

/// US Memorial Day.
pub fn memorial_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Memorial Day", KnownHoliday::MemorialDayUs, localities)
}

/// US Labor Day.
pub fn labor_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Labor Day", KnownHoliday::LaborDayUs, localities)
}

/// US Columbus Day.
pub fn columbus_day_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Columbus Day", KnownHoliday::ColumbusDayUs, localities)
}

/// US Thanksgiving Day.
pub fn thanksgiving_us(localities: impl IntoIterator<Item = Locality>) -> Result<Holiday> {
    moveable("Thanksgiving Day", KnownHoliday::ThanksgivingUs, localities)
}

// ── Calendars ─────────────────────────────────────────────────────────────────

/// US federal holidays (Juneteenth excluded: it has no fixed first year in
/// this model).
pub fn united_states_federal() -> Result<HolidayCalendar> {
    let country = Locality::country("US", "United States")?;
    let us = || [country.clone()];
    HolidayCalendar::builder()
        .name("US Federal")
        .holiday(new_years_day(us())?)
        .holiday(martin_luther_king_day_us(us())?)
        .holiday(presidents_day_us(us())?)
        .holiday(memorial_day_us(us())?)
        .holiday(independence_day_us(us())?)
        .holiday(labor_day_us(us())?)
        .holiday(columbus_day_us(us())?)
        .holiday(veterans_day_us(us())?)
        .holiday(thanksgiving_us(us())?)
        .holiday(christmas_day(us())?)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{date_only, observed_date_only};
    use hc_time::{Date, Weekday};

    fn date(y: i32, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn gb() -> Locality {
        Locality::country("GB", "United Kingdom").unwrap()
    }

    #[test]
    fn easter_cycle_2024() {
        assert_eq!(date_only(&palm_sunday([gb()]).unwrap(), 2024).unwrap(), date(2024, 3, 24));
        assert_eq!(date_only(&good_friday([gb()]).unwrap(), 2024).unwrap(), date(2024, 3, 29));
        assert_eq!(date_only(&easter_monday([gb()]).unwrap(), 2024).unwrap(), date(2024, 4, 1));
        assert_eq!(date_only(&ascension_day([gb()]).unwrap(), 2024).unwrap(), date(2024, 5, 9));
        assert_eq!(date_only(&whit_monday([gb()]).unwrap(), 2024).unwrap(), date(2024, 5, 20));
    }

    #[test]
    fn easter_offsets_land_on_expected_weekdays() {
        let cases = [
            (palm_sunday([gb()]).unwrap(), Weekday::Sunday),
            (good_friday([gb()]).unwrap(), Weekday::Friday),
            (easter_monday([gb()]).unwrap(), Weekday::Monday),
            (ascension_day([gb()]).unwrap(), Weekday::Thursday),
            (whit_monday([gb()]).unwrap(), Weekday::Monday),
        ];
        for year in 1990..2040 {
            for (holiday, weekday) in &cases {
                assert_eq!(date_only(holiday, year).unwrap().weekday(), *weekday);
            }
        }
    }

    #[test]
    fn boxing_day_2021_mondayised() {
        // Sunday 26 December 2021 is observed on Monday the 27th
        let h = boxing_day([gb()]).unwrap();
        assert_eq!(observed_date_only(&h, 2021).unwrap(), date(2021, 12, 27));
    }

    #[test]
    fn federal_calendar_has_ten_holidays() {
        let cal = united_states_federal().unwrap();
        assert_eq!(cal.name(), "US Federal");
        assert_eq!(cal.holidays().len(), 10);
        assert!(cal.get("Thanksgiving Day").is_some());
        assert!(cal.get("Good Friday").is_none());
    }
}
