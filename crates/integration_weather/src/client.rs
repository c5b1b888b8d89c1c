//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap geocoding and weather endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, GeocodedLocation, Units};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Client is missing required configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Geocoding returned no match
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Provider has no data for the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// API key rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// API key valid but the plan does not cover the endpoint
    #[error("Not subscribed: {0}")]
    NotSubscribed(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key, sent as the `appid` query parameter
    #[serde(default)]
    pub api_key: Option<String>,

    /// Full URL overriding the current-conditions endpoint
    #[serde(default)]
    pub current_url: Option<String>,

    /// Units of measurement (default: metric)
    #[serde(default)]
    pub units: Units,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            current_url: None,
            units: Units::default(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for geocoding and fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Resolve a `city[,state][,country]` query to the best-matching location
    async fn geocode(&self, query: &str) -> Result<GeocodedLocation, WeatherError>;

    /// Get current conditions for a location
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        exclude: &[String],
    ) -> Result<serde_json::Value, WeatherError>;

    /// Get the forecast for a location
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        exclude: &[String],
    ) -> Result<serde_json::Value, WeatherError>;

    /// Get historical data starting at `start` (Unix seconds)
    ///
    /// `granularity` is `hour` or `day`.
    async fn get_history(
        &self,
        latitude: f64,
        longitude: f64,
        granularity: &str,
        start: i64,
        count: u32,
    ) -> Result<serde_json::Value, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
    api_key: String,
}

impl OpenWeatherMapClient {
    /// Create a new OpenWeatherMap client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                WeatherError::Configuration("OpenWeatherMap API key is required".to_string())
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn current_url(&self) -> String {
        self.config
            .current_url
            .clone()
            .unwrap_or_else(|| self.endpoint("/data/2.5/weather"))
    }

    /// Query parameters shared by the current and forecast endpoints
    fn weather_params(&self, latitude: f64, longitude: f64, exclude: &[String]) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("units", self.config.units.as_str().to_string()),
            ("appid", self.api_key.clone()),
        ];
        let exclude = exclude
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        if !exclude.is_empty() {
            params.push(("exclude", exclude));
        }
        params
    }

    /// Map a non-success response to an error, reading the provider message
    async fn error_for_status(response: Response) -> WeatherError {
        let status = response.status();
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("HTTP {status}"));

        warn!(status = %status, message = %message, "OpenWeatherMap request failed");

        match status {
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized(message),
            StatusCode::FORBIDDEN => WeatherError::NotSubscribed(message),
            StatusCode::NOT_FOUND => WeatherError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(message),
            _ => WeatherError::RequestFailed(message),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, WeatherError> {
        let response = self.client.get(url).query(params).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<GeocodedLocation, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::LocationNotFound(String::new()));
        }

        let url = self.endpoint("/geo/1.0/direct");
        debug!(url = %url, query = %query, "Geocoding city");

        let params = [
            ("q", query.to_string()),
            ("limit", "1".to_string()),
            ("appid", self.api_key.clone()),
        ];
        let results: Vec<GeocodedLocation> = self.get_json(&url, &params).await?;

        results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))
    }

    #[instrument(skip(self, exclude), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
        exclude: &[String],
    ) -> Result<serde_json::Value, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.current_url();
        debug!(url = %url, "Fetching current weather");

        self.get_json(&url, &self.weather_params(latitude, longitude, exclude))
            .await
    }

    #[instrument(skip(self, exclude), fields(lat = %latitude, lon = %longitude))]
    async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        exclude: &[String],
    ) -> Result<serde_json::Value, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.endpoint("/data/2.5/forecast");
        debug!(url = %url, "Fetching weather forecast");

        self.get_json(&url, &self.weather_params(latitude, longitude, exclude))
            .await
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_history(
        &self,
        latitude: f64,
        longitude: f64,
        granularity: &str,
        start: i64,
        count: u32,
    ) -> Result<serde_json::Value, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.endpoint("/data/2.5/history/city");
        debug!(url = %url, "Fetching historical weather");

        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("type", granularity.to_string()),
            ("start", start.to_string()),
            ("cnt", count.to_string()),
            ("appid", self.api_key.clone()),
        ];
        self.get_json(&url, &params).await
    }

    async fn is_healthy(&self) -> bool {
        self.geocode("London,GB").await.is_ok()
    }
}
