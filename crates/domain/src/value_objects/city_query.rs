//! City lookup value object
//!
//! A city name with optional disambiguating state and country codes,
//! rendered the way the geocoding provider expects (`city[,state][,country]`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A city name plus optional state and country codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CityQuery {
    city: String,
    state_code: Option<String>,
    country_code: Option<String>,
}

impl CityQuery {
    /// Create a new city query
    ///
    /// Surrounding whitespace is removed; blank codes are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the city name is blank or
    /// contains a comma (which would corrupt the provider query).
    pub fn new(
        city: impl Into<String>,
        state_code: Option<String>,
        country_code: Option<String>,
    ) -> Result<Self, DomainError> {
        let city = city.into().trim().to_string();
        if city.is_empty() {
            return Err(DomainError::ValidationError(
                "city name must not be empty".to_string(),
            ));
        }
        if city.contains(',') {
            return Err(DomainError::ValidationError(format!(
                "city name must not contain commas: {city}"
            )));
        }

        Ok(Self {
            city,
            state_code: normalize_code(state_code),
            country_code: normalize_code(country_code),
        })
    }

    /// Create a query for a bare city name
    pub fn city(city: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(city, None, None)
    }

    /// Attach a state code
    #[must_use]
    pub fn with_state(mut self, state_code: impl Into<String>) -> Self {
        self.state_code = normalize_code(Some(state_code.into()));
        self
    }

    /// Attach a country code
    #[must_use]
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = normalize_code(Some(country_code.into()));
        self
    }

    /// City name
    pub fn city_name(&self) -> &str {
        &self.city
    }

    /// State code, if any
    pub fn state_code(&self) -> Option<&str> {
        self.state_code.as_deref()
    }

    /// Country code, if any
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// Render as a provider query string, e.g. `Springfield,MO,US`
    pub fn to_query_string(&self) -> String {
        let mut query = self.city.clone();
        for code in [&self.state_code, &self.country_code].into_iter().flatten() {
            query.push(',');
            query.push_str(code);
        }
        query
    }
}

fn normalize_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_uppercase()).filter(|c| !c.is_empty())
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_city_renders_name_only() {
        let query = CityQuery::city("Springfield").unwrap();
        assert_eq!(query.to_query_string(), "Springfield");
        assert!(query.state_code().is_none());
        assert!(query.country_code().is_none());
    }

    #[test]
    fn state_and_country_are_appended_in_order() {
        let query = CityQuery::new(
            "Springfield",
            Some("MO".to_string()),
            Some("US".to_string()),
        )
        .unwrap();
        assert_eq!(query.to_query_string(), "Springfield,MO,US");
    }

    #[test]
    fn country_without_state() {
        let query = CityQuery::city("Paris").unwrap().with_country("fr");
        assert_eq!(query.to_query_string(), "Paris,FR");
    }

    #[test]
    fn blank_codes_are_dropped() {
        let query = CityQuery::new(" Berlin ", Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(query.to_query_string(), "Berlin");
    }

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        let query = CityQuery::city("Springfield")
            .unwrap()
            .with_state(" mo ")
            .with_country("us");
        assert_eq!(query.state_code(), Some("MO"));
        assert_eq!(query.country_code(), Some("US"));
    }

    #[test]
    fn empty_city_is_rejected() {
        assert!(CityQuery::city("   ").is_err());
    }

    #[test]
    fn comma_in_city_is_rejected() {
        assert!(CityQuery::city("Springfield,MO").is_err());
    }

    #[test]
    fn display_matches_query_string() {
        let query = CityQuery::city("London").unwrap().with_country("GB");
        assert_eq!(query.to_string(), "London,GB");
    }
}
