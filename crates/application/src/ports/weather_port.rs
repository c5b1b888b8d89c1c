//! Weather service port
//!
//! Defines the interface for geocoding and weather data retrieval.

use async_trait::async_trait;
use domain::{CityQuery, GeoLocation, HistoryGranularity, UnixTimestamp, WeatherDataKind};
#[cfg(test)]
use mockall::automock;
use serde_json::{Value, json};

use crate::error::ApplicationError;

/// A city resolved to coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Name as known by the provider
    pub name: String,
    /// Coordinates of the best match
    pub location: GeoLocation,
    /// Country code, where available
    pub country: Option<String>,
    /// State or region, where available
    pub state: Option<String>,
}

impl ResolvedLocation {
    /// JSON form handed to the model
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "lat": self.location.latitude(),
            "lon": self.location.longitude(),
            "country": self.country,
            "state": self.state,
        })
    }
}

/// Port for weather service operations
///
/// Weather payloads are provider JSON, passed through unmodified.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Resolve a city to coordinates
    ///
    /// Fails with `ApplicationError::NotFound` when the provider has no match.
    async fn geocode(&self, query: &CityQuery) -> Result<ResolvedLocation, ApplicationError>;

    /// Fetch current conditions or a forecast for a location
    async fn fetch_weather(
        &self,
        location: &GeoLocation,
        kind: WeatherDataKind,
        exclude: &[String],
    ) -> Result<Value, ApplicationError>;

    /// Fetch historical data starting at `start`
    async fn fetch_history(
        &self,
        location: &GeoLocation,
        granularity: HistoryGranularity,
        start: UnixTimestamp,
        count: u32,
    ) -> Result<Value, ApplicationError>;

    /// Check if the weather service is available
    async fn is_available(&self) -> bool;
}
