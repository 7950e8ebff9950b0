//! Holiday definitions.
//!
//! [`Holiday`] is a closed set of four variants.  A definition never stores a
//! year; resolving it for a year (see [`crate::operations`]) returns a new
//! value of the same shape with its date slot filled in.
//!
//! The base of a [`MoveableFromBaseHoliday`] is owned (`Box<Holiday>`), so a
//! base chain is always a finite tree and cannot loop back on itself.

use hc_core::errors::{Error, Result};
use hc_core::{ensure, Year};
use hc_time::{Date, Month};

use crate::holiday_type::HolidayType;
use crate::known_holiday::KnownHoliday;
use crate::locality::Locality;
use crate::operations::mondayise;

/// Fields shared by every holiday variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::HolidayDetailsRaw")
)]
pub struct HolidayDetails {
    name: String,
    description: String,
    localities: Vec<Locality>,
    holiday_type: HolidayType,
}

impl HolidayDetails {
    /// Create holiday details.
    ///
    /// # Errors
    /// `Error::Precondition` if the name is blank or `localities` is empty.
    pub fn new(
        name: impl Into<String>,
        holiday_type: HolidayType,
        localities: impl IntoIterator<Item = Locality>,
    ) -> Result<Self> {
        let name = name.into();
        let localities: Vec<Locality> = localities.into_iter().collect();
        ensure!(!name.trim().is_empty(), "holiday name must not be blank");
        ensure!(
            !localities.is_empty(),
            "holiday '{name}' must apply to at least one locality"
        );
        Ok(Self {
            name,
            description: String::new(),
            localities,
            holiday_type,
        })
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Holiday name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description (may be empty).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Localities the holiday applies to, in definition order.  Never empty.
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }

    /// Holiday classification.
    pub fn holiday_type(&self) -> HolidayType {
        self.holiday_type
    }
}

/// A holiday on the same day and month every year.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::FixedHolidayRaw")
)]
pub struct FixedHoliday {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) details: HolidayDetails,
    pub(crate) day: u8,
    pub(crate) month: Month,
    pub(crate) mondayisation: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub(crate) date: Option<Date>,
}

impl FixedHoliday {
    pub(crate) fn new(details: HolidayDetails, day: u8, month: Month, mondayisation: bool) -> Result<Self> {
        ensure!(
            (1..=month.max_days()).contains(&day),
            "'{}': day {day} never occurs in {month}",
            details.name
        );
        Ok(Self {
            details,
            day,
            month,
            mondayisation,
            date: None,
        })
    }

    /// Day of the month.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Month of the year.
    pub fn month(&self) -> Month {
        self.month
    }
}

/// A resolved nominal / observed date pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::ObservedHolidayRaw")
)]
pub struct ObservedHoliday {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) details: HolidayDetails,
    pub(crate) nominal_date: Date,
    pub(crate) observed_date: Date,
    pub(crate) mondayisation: bool,
}

impl ObservedHoliday {
    /// The date the holiday falls on.
    pub fn nominal_date(&self) -> Date {
        self.nominal_date
    }

    /// The date the holiday is observed on.
    pub fn observed_date(&self) -> Date {
        self.observed_date
    }
}

/// A holiday computed by a [`KnownHoliday`] rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveableHoliday {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) details: HolidayDetails,
    pub(crate) known_holiday: KnownHoliday,
    #[cfg_attr(feature = "serde", serde(default))]
    pub(crate) mondayisation: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub(crate) date: Option<Date>,
}

impl MoveableHoliday {
    /// The rule producing the date.
    pub fn known_holiday(&self) -> KnownHoliday {
        self.known_holiday
    }
}

/// A holiday a fixed number of days away from another holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::MoveableFromBaseHolidayRaw")
)]
pub struct MoveableFromBaseHoliday {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) details: HolidayDetails,
    pub(crate) known_holiday: KnownHoliday,
    pub(crate) base_holiday: Box<Holiday>,
    pub(crate) day_offset: i32,
    pub(crate) mondayisation: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub(crate) date: Option<Date>,
}

impl MoveableFromBaseHoliday {
    pub(crate) fn new(
        details: HolidayDetails,
        known_holiday: KnownHoliday,
        base_holiday: Holiday,
        day_offset: i32,
        mondayisation: bool,
    ) -> Result<Self> {
        if let Some(root) = base_holiday.known_holiday() {
            ensure!(
                root == known_holiday,
                "'{}' is declared relative to {known_holiday} but its base '{}' is {root}",
                details.name,
                base_holiday.name()
            );
        }
        Ok(Self {
            details,
            known_holiday,
            base_holiday: Box::new(base_holiday),
            day_offset,
            mondayisation,
            date: None,
        })
    }

    /// The rule at the root of the base chain.
    pub fn known_holiday(&self) -> KnownHoliday {
        self.known_holiday
    }

    /// The holiday this one is offset from.
    pub fn base_holiday(&self) -> &Holiday {
        &self.base_holiday
    }

    /// Days added to the base date (negative for earlier).
    pub fn day_offset(&self) -> i32 {
        self.day_offset
    }

    /// Number of base links below this holiday.
    pub fn base_depth(&self) -> usize {
        let mut depth = 1;
        let mut base = self.base_holiday.as_ref();
        while let Holiday::MoveableFromBase(inner) = base {
            depth += 1;
            base = inner.base_holiday.as_ref();
        }
        depth
    }
}

/// A holiday definition or a resolved holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum Holiday {
    /// Same day and month every year.
    Fixed(FixedHoliday),
    /// A carried nominal / observed date pair.
    Observed(ObservedHoliday),
    /// Computed by a named rule.
    Moveable(MoveableHoliday),
    /// Offset from another holiday.
    MoveableFromBase(MoveableFromBaseHoliday),
}

impl Holiday {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// A holiday on `day` of `month` every year.
    ///
    /// The day must exist in `month` in at least one year, so 29 February is
    /// accepted and only fails when resolved for a non-leap year.
    pub fn fixed(details: HolidayDetails, day: u8, month: Month, mondayisation: bool) -> Result<Self> {
        FixedHoliday::new(details, day, month, mondayisation).map(Holiday::Fixed)
    }

    /// A nominal date together with its observed date.
    pub fn observed(details: HolidayDetails, nominal_date: Date, mondayisation: bool) -> Self {
        Holiday::Observed(ObservedHoliday {
            details,
            nominal_date,
            observed_date: mondayise(nominal_date, mondayisation),
            mondayisation,
        })
    }

    /// A holiday computed by `known_holiday`.
    pub fn moveable(details: HolidayDetails, known_holiday: KnownHoliday, mondayisation: bool) -> Self {
        Holiday::Moveable(MoveableHoliday {
            details,
            known_holiday,
            mondayisation,
            date: None,
        })
    }

    /// A holiday `day_offset` days from `base_holiday`.
    ///
    /// # Errors
    /// `Error::Precondition` if the base chain is rooted in a different
    /// known holiday than `known_holiday`.
    pub fn moveable_from_base(
        details: HolidayDetails,
        known_holiday: KnownHoliday,
        base_holiday: Holiday,
        day_offset: i32,
        mondayisation: bool,
    ) -> Result<Self> {
        MoveableFromBaseHoliday::new(details, known_holiday, base_holiday, day_offset, mondayisation)
            .map(Holiday::MoveableFromBase)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Shared details.
    pub fn details(&self) -> &HolidayDetails {
        match self {
            Holiday::Fixed(h) => &h.details,
            Holiday::Observed(h) => &h.details,
            Holiday::Moveable(h) => &h.details,
            Holiday::MoveableFromBase(h) => &h.details,
        }
    }

    /// Holiday name.
    pub fn name(&self) -> &str {
        self.details().name()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.details().description()
    }

    /// Localities the holiday applies to.
    pub fn localities(&self) -> &[Locality] {
        self.details().localities()
    }

    /// Holiday classification.
    pub fn holiday_type(&self) -> HolidayType {
        self.details().holiday_type()
    }

    /// Whether a weekend date is moved to the nearest weekday when observed.
    pub fn mondayisation(&self) -> bool {
        match self {
            Holiday::Fixed(h) => h.mondayisation,
            Holiday::Observed(h) => h.mondayisation,
            Holiday::Moveable(h) => h.mondayisation,
            Holiday::MoveableFromBase(h) => h.mondayisation,
        }
    }

    /// The rule at the root of this holiday's date, if any.
    pub fn known_holiday(&self) -> Option<KnownHoliday> {
        match self {
            Holiday::Fixed(_) | Holiday::Observed(_) => None,
            Holiday::Moveable(h) => Some(h.known_holiday),
            Holiday::MoveableFromBase(h) => Some(h.known_holiday),
        }
    }

    /// First year this holiday can be resolved for.
    ///
    /// That is the first year of the rule at the root of the base chain, or
    /// `Date::MIN_YEAR` when the chain is rooted in a fixed day and month.
    pub fn valid_from(&self) -> Year {
        let mut root = self;
        while let Holiday::MoveableFromBase(h) = root {
            root = &h.base_holiday;
        }
        match root {
            Holiday::Moveable(h) => h.known_holiday.valid_from(),
            _ => Date::MIN_YEAR,
        }
    }

    /// The resolved nominal date, or `None` for an unresolved definition.
    pub fn date(&self) -> Option<Date> {
        match self {
            Holiday::Fixed(h) => h.date,
            Holiday::Observed(h) => Some(h.nominal_date),
            Holiday::Moveable(h) => h.date,
            Holiday::MoveableFromBase(h) => h.date,
        }
    }

    /// The observed date; only an [`Holiday::Observed`] value carries one.
    pub fn observed_date(&self) -> Option<Date> {
        match self {
            Holiday::Observed(h) => Some(h.observed_date),
            _ => None,
        }
    }

    /// Return `true` if any of the holiday's localities contains `locality`.
    pub fn applies_to(&self, locality: &Locality) -> bool {
        self.localities().iter().any(|l| l.contains(locality))
    }

    /// Copy of `self` with its date slot set to `nominal`.
    ///
    /// For an `Observed` value the observed date is recomputed from the
    /// variant's own mondayisation flag.
    pub(crate) fn with_resolved(&self, nominal: Date) -> Holiday {
        match self {
            Holiday::Fixed(h) => Holiday::Fixed(FixedHoliday {
                date: Some(nominal),
                ..h.clone()
            }),
            Holiday::Observed(h) => Holiday::Observed(ObservedHoliday {
                nominal_date: nominal,
                observed_date: mondayise(nominal, h.mondayisation),
                ..h.clone()
            }),
            Holiday::Moveable(h) => Holiday::Moveable(MoveableHoliday {
                date: Some(nominal),
                ..h.clone()
            }),
            Holiday::MoveableFromBase(h) => Holiday::MoveableFromBase(MoveableFromBaseHoliday {
                date: Some(nominal),
                ..h.clone()
            }),
        }
    }
}

impl std::fmt::Display for Holiday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.date(), self.observed_date()) {
            (Some(nominal), Some(observed)) if nominal != observed => {
                write!(f, "{} ({nominal}, observed {observed})", self.name())
            }
            (Some(nominal), _) => write!(f, "{} ({nominal})", self.name()),
            (None, _) => write!(f, "{}", self.name()),
        }
    }
}

impl From<FixedHoliday> for Holiday {
    fn from(h: FixedHoliday) -> Self {
        Holiday::Fixed(h)
    }
}

impl From<ObservedHoliday> for Holiday {
    fn from(h: ObservedHoliday) -> Self {
        Holiday::Observed(h)
    }
}

impl TryFrom<Holiday> for ObservedHoliday {
    type Error = Error;

    fn try_from(h: Holiday) -> Result<Self> {
        match h {
            Holiday::Observed(o) => Ok(o),
            other => Err(Error::Precondition(format!(
                "'{}' is not an observed holiday",
                other.name()
            ))),
        }
    }
}

#[cfg(feature = "serde")]
mod wire {
    //! Unchecked shapes read from serialized data, validated by the constructors.

    use super::*;

    #[derive(serde::Deserialize)]
    pub(super) struct HolidayDetailsRaw {
        name: String,
        #[serde(default)]
        description: String,
        localities: Vec<Locality>,
        holiday_type: HolidayType,
    }

    impl TryFrom<HolidayDetailsRaw> for HolidayDetails {
        type Error = Error;

        fn try_from(raw: HolidayDetailsRaw) -> Result<Self> {
            Ok(HolidayDetails::new(raw.name, raw.holiday_type, raw.localities)?
                .with_description(raw.description))
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct FixedHolidayRaw {
        #[serde(flatten)]
        details: HolidayDetails,
        day: u8,
        month: Month,
        #[serde(default)]
        mondayisation: bool,
        #[serde(default)]
        date: Option<Date>,
    }

    impl TryFrom<FixedHolidayRaw> for FixedHoliday {
        type Error = Error;

        fn try_from(raw: FixedHolidayRaw) -> Result<Self> {
            let mut holiday = FixedHoliday::new(raw.details, raw.day, raw.month, raw.mondayisation)?;
            if let Some(date) = raw.date {
                ensure!(
                    date.month_of_year() == holiday.month && date.day_of_month() == holiday.day,
                    "'{}': date {date} is not {} {}",
                    holiday.details.name,
                    holiday.day,
                    holiday.month
                );
            }
            holiday.date = raw.date;
            Ok(holiday)
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct ObservedHolidayRaw {
        #[serde(flatten)]
        details: HolidayDetails,
        nominal_date: Date,
        observed_date: Date,
        mondayisation: bool,
    }

    impl TryFrom<ObservedHolidayRaw> for ObservedHoliday {
        type Error = Error;

        fn try_from(raw: ObservedHolidayRaw) -> Result<Self> {
            let expected = mondayise(raw.nominal_date, raw.mondayisation);
            ensure!(
                raw.observed_date == expected,
                "'{}': observed date {} does not follow from {} (expected {expected})",
                raw.details.name,
                raw.observed_date,
                raw.nominal_date
            );
            Ok(ObservedHoliday {
                details: raw.details,
                nominal_date: raw.nominal_date,
                observed_date: raw.observed_date,
                mondayisation: raw.mondayisation,
            })
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct MoveableFromBaseHolidayRaw {
        #[serde(flatten)]
        details: HolidayDetails,
        known_holiday: KnownHoliday,
        base_holiday: Box<Holiday>,
        day_offset: i32,
        #[serde(default)]
        mondayisation: bool,
        #[serde(default)]
        date: Option<Date>,
    }

    impl TryFrom<MoveableFromBaseHolidayRaw> for MoveableFromBaseHoliday {
        type Error = Error;

        fn try_from(raw: MoveableFromBaseHolidayRaw) -> Result<Self> {
            let mut holiday = MoveableFromBaseHoliday::new(
                raw.details,
                raw.known_holiday,
                *raw.base_holiday,
                raw.day_offset,
                raw.mondayisation,
            )?;
            holiday.date = raw.date;
            Ok(holiday)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locality::{Country, Subdivision};

    fn us() -> Locality {
        Locality::country("US", "United States").unwrap()
    }

    fn details(name: &str) -> HolidayDetails {
        HolidayDetails::new(name, HolidayType::National, [us()]).unwrap()
    }

    #[test]
    fn details_require_name_and_locality() {
        assert!(HolidayDetails::new("", HolidayType::National, [us()]).is_err());
        let err = HolidayDetails::new("Nowhere Day", HolidayType::National, []).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        let d = details("Christmas").with_description("Nativity");
        assert_eq!(d.description(), "Nativity");
        assert_eq!(d.localities().len(), 1);
    }

    #[test]
    fn fixed_day_must_exist_in_some_year() {
        assert!(Holiday::fixed(details("Leap Day"), 29, Month::February, false).is_ok());
        assert!(Holiday::fixed(details("Bad"), 30, Month::February, false).is_err());
        assert!(Holiday::fixed(details("Bad"), 31, Month::April, false).is_err());
        assert!(Holiday::fixed(details("Bad"), 0, Month::May, false).is_err());
    }

    #[test]
    fn definitions_are_unresolved() {
        let h = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        assert_eq!(h.date(), None);
        assert_eq!(h.observed_date(), None);
        assert_eq!(h.known_holiday(), Some(KnownHoliday::Easter));
        assert_eq!(h.to_string(), "Easter");
    }

    #[test]
    fn observed_constructor_mondayises() {
        let sat = Date::from_ymd(2021, 12, 25).unwrap();
        let h = Holiday::observed(details("Christmas"), sat, true);
        assert_eq!(h.date(), Some(sat));
        assert_eq!(h.observed_date(), Some(Date::from_ymd(2021, 12, 24).unwrap()));
        assert_eq!(h.to_string(), "Christmas (2021-12-25, observed 2021-12-24)");
    }

    #[test]
    fn base_must_share_known_holiday() {
        let easter = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        let ok = Holiday::moveable_from_base(
            details("Good Friday"),
            KnownHoliday::Easter,
            easter.clone(),
            -2,
            false,
        );
        assert!(ok.is_ok());
        let mismatched = Holiday::moveable_from_base(
            details("Good Friday"),
            KnownHoliday::ThanksgivingUs,
            easter,
            -2,
            false,
        );
        assert!(matches!(mismatched, Err(Error::Precondition(_))));
    }

    #[test]
    fn base_depth_counts_links() {
        let easter = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        let monday =
            Holiday::moveable_from_base(details("Easter Monday"), KnownHoliday::Easter, easter, 1, false)
                .unwrap();
        let tuesday =
            Holiday::moveable_from_base(details("Easter Tuesday"), KnownHoliday::Easter, monday, 1, false)
                .unwrap();
        let Holiday::MoveableFromBase(h) = tuesday else {
            panic!("expected a base-relative holiday");
        };
        assert_eq!(h.base_depth(), 2);
        assert_eq!(h.base_holiday().name(), "Easter Monday");
    }

    #[test]
    fn valid_from_follows_the_root_rule() {
        let mlk = Holiday::moveable(details("MLK"), KnownHoliday::MartinLutherKingDayUs, false);
        assert_eq!(mlk.valid_from(), 1983);
        let after =
            Holiday::moveable_from_base(details("Day after"), KnownHoliday::MartinLutherKingDayUs, mlk, 1, false)
                .unwrap();
        assert_eq!(after.valid_from(), 1983);
        let fixed = Holiday::fixed(details("New Year"), 1, Month::January, false).unwrap();
        assert_eq!(fixed.valid_from(), Date::MIN_YEAR);
    }

    #[test]
    fn observed_try_from() {
        let h = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        assert!(ObservedHoliday::try_from(h).is_err());
    }

    #[test]
    fn applies_to_nested_localities() {
        let us = Country::new("US", "United States").unwrap();
        let ca = Subdivision::new(us, "CA", "California").unwrap();
        let h = Holiday::moveable(details("Easter"), KnownHoliday::Easter, false);
        assert!(h.applies_to(&Locality::Subdivision(ca)));
        assert!(!h.applies_to(&Locality::country("CA", "Canada").unwrap()));
    }
}
