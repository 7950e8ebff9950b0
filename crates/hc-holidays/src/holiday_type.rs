//! Holiday classification.

/// Kind of holiday, by the authority that declares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HolidayType {
    /// Declared by a national government.
    National,
    /// Declared by a state, province, or region.
    State,
    /// Declared by a city.
    Municipal,
    /// Religious observance.
    Religious,
    /// Commercial or cultural observance (e.g. Valentine's Day).
    Commercial,
}

impl HolidayType {
    /// Return `true` for holidays declared by a level of government.
    pub fn is_governmental(&self) -> bool {
        matches!(
            self,
            HolidayType::National | HolidayType::State | HolidayType::Municipal
        )
    }
}

impl std::fmt::Display for HolidayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HolidayType::National => "National",
            HolidayType::State => "State",
            HolidayType::Municipal => "Municipal",
            HolidayType::Religious => "Religious",
            HolidayType::Commercial => "Commercial",
        };
        write!(f, "{s}")
    }
}
