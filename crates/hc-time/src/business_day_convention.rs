//! Rolling rules for dates that are not business days.

/// Where a calendar moves a date that is not a business day.
///
/// The modified rules keep the result inside the original month by rolling
/// the other way when the first choice crosses a month boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// Next business day.
    Following,
    ModifiedFollowing,
    /// Previous business day.
    Preceding,
    ModifiedPreceding,
    /// Leave the date alone.
    Unadjusted,
    /// Closer of the next and previous business day; ties go forward.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Nearest => "Nearest",
        })
    }
}
