//! Months of the year.

/// Month of the year, January = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The month numbered `n`, or `None` outside `1..=12`.
    pub fn from_number(n: u8) -> Option<Self> {
        let index = usize::from(n).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Longest length of the month over all years, so 29 for February.
    ///
    /// A fixed holiday is accepted when its day is within this bound; 29
    /// February then only fails when resolved for a common year.
    pub fn max_days(self) -> u8 {
        match self {
            Month::February => 29,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl From<Month> for u8 {
    fn from(m: Month) -> u8 {
        m.number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_match_table_order() {
        for (i, m) in Month::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(m.number()), i + 1);
            assert_eq!(Month::from_number(m.number()), Some(m));
        }
        assert!(Month::from_number(0).is_none());
        assert!(Month::from_number(13).is_none());
    }

    #[test]
    fn max_days_matches_leap_year_lengths() {
        for m in Month::ALL {
            assert_eq!(m.max_days(), crate::date::days_in_month(2024, m.number()));
        }
    }
}
