//! OpenWeatherMap API models

use std::fmt;

use serde::{Deserialize, Serialize};

/// A location resolved by the direct geocoding endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    /// Location name as known by the provider
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// ISO 3166 country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// State or region name, where available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Units of measurement requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Kelvin, meter/sec
    Standard,
    /// Celsius, meter/sec
    #[default]
    Metric,
    /// Fahrenheit, miles/hour
    Imperial,
}

impl Units {
    /// Query parameter value
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error body returned by OpenWeatherMap (`{"cod": 401, "message": "..."}`)
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoded_location_ignores_unknown_fields() {
        let json = serde_json::json!({
            "name": "Springfield",
            "local_names": {"en": "Springfield"},
            "lat": 37.2153,
            "lon": -93.2982,
            "country": "US",
            "state": "Missouri"
        });
        let loc: GeocodedLocation = serde_json::from_value(json).unwrap();
        assert_eq!(loc.name, "Springfield");
        assert_eq!(loc.state.as_deref(), Some("Missouri"));
    }

    #[test]
    fn geocoded_location_optional_fields() {
        let json = serde_json::json!({"name": "Nowhere", "lat": 1.0, "lon": 2.0});
        let loc: GeocodedLocation = serde_json::from_value(json).unwrap();
        assert!(loc.country.is_none());
        assert!(loc.state.is_none());
    }

    #[test]
    fn units_serde() {
        let units: Units = serde_json::from_str("\"imperial\"").unwrap();
        assert_eq!(units, Units::Imperial);
        assert_eq!(Units::default().as_str(), "metric");
    }

    #[test]
    fn error_body_parses_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"cod":401,"message":"Invalid API key."}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid API key."));
    }
}
