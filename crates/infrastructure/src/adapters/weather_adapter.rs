//! Weather adapter - Implements WeatherPort using integration_weather

use application::{
    error::ApplicationError,
    ports::{ResolvedLocation, WeatherPort},
};
use async_trait::async_trait;
use domain::{CityQuery, GeoLocation, HistoryGranularity, UnixTimestamp, WeatherDataKind};
use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use serde_json::Value;
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap API
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl WeatherAdapter {
    /// Create with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the API key is missing,
    /// or an internal error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::LocationNotFound(query) => ApplicationError::NotFound(format!(
                "No location matches '{query}'. Try adding a state code and/or country code"
            )),
            WeatherError::NotFound(e) => ApplicationError::NotFound(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidOperation(WeatherError::InvalidCoordinates.to_string())
            },
            WeatherError::Unauthorized(e) => {
                ApplicationError::UpstreamAuth(format!("Weather provider rejected the API key: {e}"))
            },
            WeatherError::NotSubscribed(e) => ApplicationError::UpstreamAuth(format!(
                "Weather API key is not subscribed to this endpoint: {e}"
            )),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::Configuration(e) => ApplicationError::Configuration(e),
            WeatherError::Timeout => {
                ApplicationError::ExternalService("Weather request timed out".into())
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Malformed weather response: {e}"))
            },
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(query = %query))]
    async fn geocode(&self, query: &CityQuery) -> Result<ResolvedLocation, ApplicationError> {
        let found = self
            .client
            .geocode(&query.to_query_string())
            .await
            .map_err(Self::map_error)?;

        debug!(name = %found.name, lat = found.lat, lon = found.lon, "Resolved city");

        Ok(ResolvedLocation {
            location: GeoLocation::new(found.lat, found.lon)?,
            name: found.name,
            country: found.country,
            state: found.state,
        })
    }

    #[instrument(skip(self, exclude), fields(lat = location.latitude(), lon = location.longitude(), kind = kind.as_str()))]
    async fn fetch_weather(
        &self,
        location: &GeoLocation,
        kind: WeatherDataKind,
        exclude: &[String],
    ) -> Result<Value, ApplicationError> {
        let (lat, lon) = (location.latitude(), location.longitude());
        let result = match kind {
            WeatherDataKind::Current => self.client.get_current(lat, lon, exclude).await,
            WeatherDataKind::Forecast => self.client.get_forecast(lat, lon, exclude).await,
        };

        match &result {
            Ok(_) => debug!("Retrieved weather data"),
            Err(e) => debug!(error = %e, "Failed to get weather data"),
        }

        result.map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude(), start = %start))]
    async fn fetch_history(
        &self,
        location: &GeoLocation,
        granularity: HistoryGranularity,
        start: UnixTimestamp,
        count: u32,
    ) -> Result<Value, ApplicationError> {
        self.client
            .get_history(
                location.latitude(),
                location.longitude(),
                granularity.as_str(),
                start.as_secs(),
                count,
            )
            .await
            .map_err(Self::map_error)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
