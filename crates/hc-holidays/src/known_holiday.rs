//! Named algorithms for moveable holidays.
//!
//! Every [`KnownHoliday`] maps to one pure `year -> date` rule.  Holidays that
//! sit at a fixed distance from one of these (Good Friday, Easter Monday,
//! Pentecost, ...) are not listed here; they are expressed as
//! [`Holiday::MoveableFromBase`](crate::Holiday::MoveableFromBase) offsets.

use std::str::FromStr;

use hc_core::errors::{Error, Result};
use hc_core::Year;
use hc_time::{Date, Weekday};

/// A moveable holiday computed by a named rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum KnownHoliday {
    /// Western (Gregorian) Easter Sunday.
    Easter,
    /// US Thanksgiving: fourth Thursday of November.
    ThanksgivingUs,
    /// US Memorial Day: last Monday of May.
    MemorialDayUs,
    /// Birthday of Martin Luther King, Jr.: third Monday of January.
    MartinLutherKingDayUs,
    /// Washington's Birthday: third Monday of February.
    PresidentsDayUs,
    /// US Labor Day: first Monday of September.
    LaborDayUs,
    /// US Columbus Day: second Monday of October.
    ColumbusDayUs,
    /// Canadian Thanksgiving: second Monday of October.
    ThanksgivingCanada,
    /// Victoria Day: the Monday on or before 24 May.
    VictoriaDayCanada,
    /// UK Early May bank holiday: first Monday of May.
    EarlyMayBankHolidayUk,
    /// UK Summer bank holiday: last Monday of August.
    SummerBankHolidayUk,
}

impl KnownHoliday {
    /// Every known holiday, in declaration order.
    pub const ALL: [KnownHoliday; 11] = [
        KnownHoliday::Easter,
        KnownHoliday::ThanksgivingUs,
        KnownHoliday::MemorialDayUs,
        KnownHoliday::MartinLutherKingDayUs,
        KnownHoliday::PresidentsDayUs,
        KnownHoliday::LaborDayUs,
        KnownHoliday::ColumbusDayUs,
        KnownHoliday::ThanksgivingCanada,
        KnownHoliday::VictoriaDayCanada,
        KnownHoliday::EarlyMayBankHolidayUk,
        KnownHoliday::SummerBankHolidayUk,
    ];

    /// First year for which the rule is defined.
    ///
    /// Every rule is a Gregorian-calendar rule, so none is defined before
    /// 1583.  Martin Luther King Jr. Day is only observed from 1983.
    pub fn valid_from(&self) -> Year {
        match self {
            KnownHoliday::MartinLutherKingDayUs => 1983,
            // First full year of the Gregorian calendar
            _ => 1583,
        }
    }

    /// Stable upper-case identifier (`"EASTER"`, `"THANKSGIVING_US"`, ...).
    pub fn id(&self) -> &'static str {
        match self {
            KnownHoliday::Easter => "EASTER",
            KnownHoliday::ThanksgivingUs => "THANKSGIVING_US",
            KnownHoliday::MemorialDayUs => "MEMORIAL_DAY_US",
            KnownHoliday::MartinLutherKingDayUs => "MARTIN_LUTHER_KING_DAY_US",
            KnownHoliday::PresidentsDayUs => "PRESIDENTS_DAY_US",
            KnownHoliday::LaborDayUs => "LABOR_DAY_US",
            KnownHoliday::ColumbusDayUs => "COLUMBUS_DAY_US",
            KnownHoliday::ThanksgivingCanada => "THANKSGIVING_CANADA",
            KnownHoliday::VictoriaDayCanada => "VICTORIA_DAY_CANADA",
            KnownHoliday::EarlyMayBankHolidayUk => "EARLY_MAY_BANK_HOLIDAY_UK",
            KnownHoliday::SummerBankHolidayUk => "SUMMER_BANK_HOLIDAY_UK",
        }
    }

    /// Compute the date of this holiday in `year`.
    ///
    /// # Errors
    /// * `Error::InvalidYear` if `year` is outside `[1, 9999]`.
    /// * `Error::CalendarRange` if `year` precedes [`valid_from`](Self::valid_from).
    pub fn date(&self, year: Year) -> Result<Date> {
        if !(Date::MIN_YEAR..=Date::MAX_YEAR).contains(&year) {
            return Err(Error::InvalidYear(year));
        }
        if year < self.valid_from() {
            return Err(Error::CalendarRange {
                algorithm: self.id().to_string(),
                year,
                min_year: self.valid_from(),
            });
        }
        match self {
            KnownHoliday::Easter => easter_sunday(year),
            KnownHoliday::ThanksgivingUs => Date::nth_weekday(4, Weekday::Thursday, year, 11),
            KnownHoliday::MemorialDayUs => Date::last_weekday(Weekday::Monday, year, 5),
            KnownHoliday::MartinLutherKingDayUs => Date::nth_weekday(3, Weekday::Monday, year, 1),
            KnownHoliday::PresidentsDayUs => Date::nth_weekday(3, Weekday::Monday, year, 2),
            KnownHoliday::LaborDayUs => Date::nth_weekday(1, Weekday::Monday, year, 9),
            KnownHoliday::ColumbusDayUs | KnownHoliday::ThanksgivingCanada => {
                Date::nth_weekday(2, Weekday::Monday, year, 10)
            }
            KnownHoliday::VictoriaDayCanada => {
                Date::from_ymd(year, 5, 24)?.on_or_before(Weekday::Monday)
            }
            KnownHoliday::EarlyMayBankHolidayUk => Date::nth_weekday(1, Weekday::Monday, year, 5),
            KnownHoliday::SummerBankHolidayUk => Date::last_weekday(Weekday::Monday, year, 8),
        }
    }
}

impl std::fmt::Display for KnownHoliday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KnownHoliday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        KnownHoliday::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Precondition(format!("unknown holiday algorithm '{s}'")))
    }
}

/// Easter Sunday by the anonymous Gregorian algorithm (Meeus).
///
/// Callers guarantee `year >= 1583`.
fn easter_sunday(year: Year) -> Result<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;
    Date::from_ymd(year, (n / 31) as u8, (n % 31 + 1) as u8)
}
