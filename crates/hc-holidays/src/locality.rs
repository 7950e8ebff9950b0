//! Geographic scope of a holiday.
//!
//! A [`Locality`] is a country, a subdivision of a country (state, province,
//! region), or a city inside a subdivision.  Subdivisions embed their country
//! and cities embed both their subdivision and its country, so containment
//! checks never need a lookup.

use hc_core::errors::{Error, Result};

/// A country, identified by its ISO-3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::CountryRaw")
)]
pub struct Country {
    code: String,
    name: String,
}

impl Country {
    /// Create a country.  The code must be two ASCII letters; it is stored in
    /// upper case.
    pub fn new(code: &str, name: impl Into<String>) -> Result<Self> {
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidLocality(format!(
                "country code '{code}' is not ISO-3166-1 alpha-2"
            )));
        }
        Ok(Self {
            code: code.to_ascii_uppercase(),
            name: name.into(),
        })
    }

    /// ISO-3166-1 alpha-2 code (e.g. `"US"`).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A first-level subdivision of a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::SubdivisionRaw")
)]
pub struct Subdivision {
    country: Country,
    code: String,
    name: String,
}

impl Subdivision {
    /// Create a subdivision of `country`.  The code (e.g. `"CA"`) must not be
    /// blank and is stored in upper case.
    pub fn new(country: Country, code: &str, name: impl Into<String>) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::InvalidLocality(format!(
                "empty subdivision code in {}",
                country.code
            )));
        }
        Ok(Self {
            country,
            code: code.to_ascii_uppercase(),
            name: name.into(),
        })
    }

    /// Owning country.
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// Subdivision code, unique within its country.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A city inside a subdivision.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "wire::CityRaw")
)]
pub struct City {
    name: String,
    subdivision: Subdivision,
    country: Country,
}

impl City {
    /// Create a city.  Its country is taken from `subdivision`.
    pub fn new(name: impl Into<String>, subdivision: Subdivision) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidLocality("empty city name".into()));
        }
        let country = subdivision.country.clone();
        Ok(Self {
            name,
            subdivision,
            country,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subdivision the city belongs to.
    pub fn subdivision(&self) -> &Subdivision {
        &self.subdivision
    }

    /// Country the city belongs to.
    pub fn country(&self) -> &Country {
        &self.country
    }
}

/// Geographic scope of a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Locality {
    /// A whole country.
    Country(Country),
    /// A state, province, or region.
    Subdivision(Subdivision),
    /// A single city.
    City(City),
}

impl Locality {
    /// Shorthand for `Locality::Country(Country::new(code, name)?)`.
    pub fn country(code: &str, name: impl Into<String>) -> Result<Self> {
        Country::new(code, name).map(Locality::Country)
    }

    /// The country this locality lies in.
    pub fn owning_country(&self) -> &Country {
        match self {
            Locality::Country(c) => c,
            Locality::Subdivision(s) => &s.country,
            Locality::City(c) => &c.country,
        }
    }

    /// The subdivision this locality lies in, if it is not a whole country.
    pub fn subdivision(&self) -> Option<&Subdivision> {
        match self {
            Locality::Country(_) => None,
            Locality::Subdivision(s) => Some(s),
            Locality::City(c) => Some(&c.subdivision),
        }
    }

    /// Hierarchical code: `US`, `US-CA`, or `US-CA/San Francisco`.
    pub fn code(&self) -> String {
        match self {
            Locality::Country(c) => c.code.clone(),
            Locality::Subdivision(s) => format!("{}-{}", s.country.code, s.code),
            Locality::City(c) => {
                format!("{}-{}/{}", c.country.code, c.subdivision.code, c.name)
            }
        }
    }

    /// Return `true` if `other` lies within `self`.
    ///
    /// Containment is reflexive and transitive: a country contains its
    /// subdivisions and cities, a subdivision contains its cities, and a city
    /// contains only itself.
    pub fn contains(&self, other: &Locality) -> bool {
        if self.owning_country().code != other.owning_country().code {
            return false;
        }
        match self {
            Locality::Country(_) => true,
            Locality::Subdivision(s) => other.subdivision().is_some_and(|o| o.code == s.code),
            Locality::City(c) => matches!(other, Locality::City(o) if o == c),
        }
    }
}

impl std::fmt::Display for Locality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(feature = "serde")]
mod wire {
    //! Unchecked shapes read from serialized data, validated by the constructors.

    use super::*;

    #[derive(serde::Deserialize)]
    pub(super) struct CountryRaw {
        code: String,
        name: String,
    }

    impl TryFrom<CountryRaw> for Country {
        type Error = Error;

        fn try_from(raw: CountryRaw) -> Result<Self> {
            Country::new(&raw.code, raw.name)
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct SubdivisionRaw {
        country: Country,
        code: String,
        name: String,
    }

    impl TryFrom<SubdivisionRaw> for Subdivision {
        type Error = Error;

        fn try_from(raw: SubdivisionRaw) -> Result<Self> {
            Subdivision::new(raw.country, &raw.code, raw.name)
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct CityRaw {
        name: String,
        subdivision: Subdivision,
        #[serde(default)]
        country: Option<Country>,
    }

    impl TryFrom<CityRaw> for City {
        type Error = Error;

        fn try_from(raw: CityRaw) -> Result<Self> {
            let city = City::new(raw.name, raw.subdivision)?;
            match raw.country {
                Some(country) if country.code != city.country.code => {
                    Err(Error::InvalidLocality(format!(
                        "city '{}' is in {} but claims country {}",
                        city.name, city.country.code, country.code
                    )))
                }
                _ => Ok(city),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> Country {
        Country::new("us", "United States").unwrap()
    }

    fn california() -> Subdivision {
        Subdivision::new(us(), "CA", "California").unwrap()
    }

    #[test]
    fn country_code_validation() {
        assert_eq!(us().code(), "US");
        assert!(Country::new("USA", "United States").is_err());
        assert!(Country::new("U1", "Nowhere").is_err());
        assert!(Subdivision::new(us(), "  ", "Blank").is_err());
        assert!(City::new("", california()).is_err());
    }

    #[test]
    fn containment_hierarchy() {
        let country = Locality::Country(us());
        let state = Locality::Subdivision(california());
        let city = Locality::City(City::new("San Francisco", california()).unwrap());
        let other_city = Locality::City(City::new("Los Angeles", california()).unwrap());
        let texas = Locality::Subdivision(Subdivision::new(us(), "TX", "Texas").unwrap());

        assert!(country.contains(&country));
        assert!(country.contains(&state));
        assert!(country.contains(&city));
        assert!(state.contains(&state));
        assert!(state.contains(&city));
        assert!(!state.contains(&country));
        assert!(!texas.contains(&city));
        assert!(city.contains(&city));
        assert!(!city.contains(&other_city));
        assert!(!city.contains(&state));
    }

    #[test]
    fn containment_requires_same_country() {
        let mexico = Country::new("MX", "Mexico").unwrap();
        let baja = Subdivision::new(mexico.clone(), "CA", "Baja California").unwrap();
        let us_ca = Locality::Subdivision(california());
        assert!(!us_ca.contains(&Locality::Subdivision(baja)));
        assert!(!Locality::Country(mexico).contains(&us_ca));
    }

    #[test]
    fn city_embeds_subdivision_country() {
        let city = City::new("Sacramento", california()).unwrap();
        assert_eq!(city.country(), city.subdivision().country());
        assert_eq!(Locality::City(city).code(), "US-CA/Sacramento");
    }
}
