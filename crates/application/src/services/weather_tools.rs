//! Weather tool catalogue
//!
//! Declares the functions offered to the model and executes the calls it
//! makes. Every tool produces a JSON string. Input problems (unknown tool,
//! bad arguments, unknown city) are reported back to the model as
//! `{"error": "..."}`; provider failures abort the request.

use std::{fmt, sync::Arc};

use domain::{CityQuery, GeoLocation, HistoryGranularity, ToolCall, UnixTimestamp, WeatherDataKind};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{Instrument, debug, info_span, instrument, warn};

use crate::{
    date_parser::parse_timestamp,
    error::ApplicationError,
    ports::{ToolSpec, WeatherPort},
};

/// Tool names as declared to the model
pub mod tool_names {
    pub const GET_WEATHER_BY_CITY: &str = "get_weather_by_city";
    pub const GEOCODE_CITY: &str = "geocode_city";
    pub const GET_WEATHER_BY_COORDINATES: &str = "get_weather_by_coordinates";
    pub const GET_HISTORICAL_WEATHER: &str = "get_historical_weather";
    pub const DATETIME_TO_UTC_TIMESTAMP: &str = "datetime_to_utc_timestamp";
}

/// `exclude` may be sent as `"minutely,hourly"` or `["minutely", "hourly"]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExcludeArg {
    List(Vec<String>),
    Csv(String),
}

impl ExcludeArg {
    fn into_parts(self) -> Vec<String> {
        let parts = match self {
            Self::List(parts) => parts,
            Self::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        parts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

fn exclude_parts(exclude: Option<ExcludeArg>) -> Vec<String> {
    exclude.map(ExcludeArg::into_parts).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct CityArgs {
    city_name: String,
    #[serde(default)]
    state_code: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    exclude: Option<ExcludeArg>,
}

impl CityArgs {
    fn city_query(&self) -> Result<CityQuery, ApplicationError> {
        Ok(CityQuery::new(
            self.city_name.clone(),
            self.state_code.clone(),
            self.country_code.clone(),
        )?)
    }
}

#[derive(Debug, Deserialize)]
struct CoordinateArgs {
    lat: f64,
    lon: f64,
    #[serde(default)]
    data_type: Option<String>,
    #[serde(default)]
    exclude: Option<ExcludeArg>,
}

#[derive(Debug, Deserialize)]
struct HistoryArgs {
    lat: f64,
    lon: f64,
    start: i64,
    cnt: i64,
    #[serde(default)]
    data_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimestampArgs {
    dt: String,
}

fn data_kind(data_type: Option<&str>) -> Result<WeatherDataKind, ApplicationError> {
    data_type.map_or(Ok(WeatherDataKind::default()), |s| {
        Ok(s.parse::<WeatherDataKind>()?)
    })
}

fn granularity(data_type: Option<&str>) -> Result<HistoryGranularity, ApplicationError> {
    data_type.map_or(Ok(HistoryGranularity::default()), |s| {
        Ok(s.parse::<HistoryGranularity>()?)
    })
}

fn parse_args<T: DeserializeOwned>(tool: &str, raw: &str) -> Result<T, ApplicationError> {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| {
        ApplicationError::InvalidOperation(format!("Invalid arguments for tool '{tool}': {e}"))
    })
}

fn exclude_schema() -> Value {
    json!({
        "type": ["string", "array"],
        "items": {"type": "string"},
        "description": "Parts to exclude from the weather data (e.g. 'minutely,hourly')"
    })
}

fn data_type_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["current", "forecast"],
        "description": "Current conditions or forecast (default: current)"
    })
}

/// Executes weather tool calls against a [`WeatherPort`]
#[derive(Clone)]
pub struct WeatherToolbox {
    weather: Arc<dyn WeatherPort>,
}

impl fmt::Debug for WeatherToolbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherToolbox").finish_non_exhaustive()
    }
}

impl WeatherToolbox {
    /// Create a toolbox over a weather port
    pub fn new(weather: Arc<dyn WeatherPort>) -> Self {
        Self { weather }
    }

    /// Check if the weather backend is available
    pub async fn is_available(&self) -> bool {
        self.weather.is_available().await
    }

    /// Tool declarations offered to the model
    pub fn definitions(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec {
                name: tool_names::GET_WEATHER_BY_CITY.to_string(),
                description: "Fetches current weather or a forecast for a city. Resolves the \
                              city with geocoding first. Add state_code and country_code when \
                              the city name is ambiguous."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city_name": {"type": "string", "description": "Name of the city (e.g. 'London')"},
                        "state_code": {"type": "string", "description": "State code (e.g. 'CA' for California)"},
                        "country_code": {"type": "string", "description": "Country code (e.g. 'GB' for United Kingdom)"},
                        "data_type": data_type_schema(),
                        "exclude": exclude_schema()
                    },
                    "required": ["city_name"]
                }),
            },
            ToolSpec {
                name: tool_names::GEOCODE_CITY.to_string(),
                description: "Resolves a city to latitude and longitude.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "city_name": {"type": "string", "description": "Name of the city"},
                        "state_code": {"type": "string", "description": "State code"},
                        "country_code": {"type": "string", "description": "Country code"}
                    },
                    "required": ["city_name"]
                }),
            },
            ToolSpec {
                name: tool_names::GET_WEATHER_BY_COORDINATES.to_string(),
                description: "Fetches current weather or a forecast by coordinates.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "lat": {"type": "number", "description": "Latitude"},
                        "lon": {"type": "number", "description": "Longitude"},
                        "data_type": data_type_schema(),
                        "exclude": exclude_schema()
                    },
                    "required": ["lat", "lon"]
                }),
            },
            ToolSpec {
                name: tool_names::GET_HISTORICAL_WEATHER.to_string(),
                description: "Fetches historical weather data by coordinates. Use \
                              datetime_to_utc_timestamp to obtain the start time."
                    .to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "lat": {"type": "number", "description": "Latitude"},
                        "lon": {"type": "number", "description": "Longitude"},
                        "start": {"type": "integer", "description": "Start time as UNIX timestamp (UTC)"},
                        "cnt": {"type": "integer", "description": "Number of data points (max 24 hourly, 30 daily)"},
                        "data_type": {
                            "type": "string",
                            "enum": ["hour", "day"],
                            "description": "Granularity of the data (default: hour)"
                        }
                    },
                    "required": ["lat", "lon", "start", "cnt"]
                }),
            },
            ToolSpec {
                name: tool_names::DATETIME_TO_UTC_TIMESTAMP.to_string(),
                description: "Converts a datetime string to a UTC UNIX timestamp.".to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "dt": {
                            "type": "string",
                            "description": "Datetime in ISO 8601 format (e.g. '2023-04-08T14:30:00')"
                        }
                    },
                    "required": ["dt"]
                }),
            },
        ]
    }

    /// Execute one tool call and render its output for the model
    ///
    /// # Errors
    ///
    /// Returns an error only for failures the model cannot act on
    /// (authentication, rate limits, provider outages).
    pub async fn execute(&self, call: &ToolCall) -> Result<String, ApplicationError> {
        let span = info_span!("tool_call", tool = %call.name, call_id = %call.id);

        async {
            match self.dispatch(&call.name, &call.arguments).await {
                Ok(output) => {
                    debug!("Tool call succeeded");
                    Ok(output.to_string())
                },
                Err(e) if e.is_input_error() => {
                    debug!(error = %e, "Tool call rejected, reporting to model");
                    Ok(json!({ "error": e.to_string() }).to_string())
                },
                Err(e) => {
                    warn!(error = %e, "Tool call failed");
                    Err(e)
                },
            }
        }
        .instrument(span)
        .await
    }

    async fn dispatch(&self, name: &str, raw_args: &str) -> Result<Value, ApplicationError> {
        match name {
            tool_names::GET_WEATHER_BY_CITY => {
                self.weather_by_city(parse_args(name, raw_args)?).await
            },
            tool_names::GEOCODE_CITY => self.geocode_city(parse_args(name, raw_args)?).await,
            tool_names::GET_WEATHER_BY_COORDINATES => {
                self.weather_by_coordinates(parse_args(name, raw_args)?).await
            },
            tool_names::GET_HISTORICAL_WEATHER => {
                self.historical_weather(parse_args(name, raw_args)?).await
            },
            tool_names::DATETIME_TO_UTC_TIMESTAMP => {
                Self::datetime_to_timestamp(&parse_args(name, raw_args)?)
            },
            other => Err(ApplicationError::InvalidOperation(format!(
                "Unknown tool: {other}"
            ))),
        }
    }

    #[instrument(skip(self, args), fields(city = %args.city_name))]
    async fn weather_by_city(&self, args: CityArgs) -> Result<Value, ApplicationError> {
        let query = args.city_query()?;
        let kind = data_kind(args.data_type.as_deref())?;
        let resolved = self.weather.geocode(&query).await?;
        let weather = self
            .weather
            .fetch_weather(&resolved.location, kind, &exclude_parts(args.exclude))
            .await?;

        Ok(json!({
            "location": resolved.to_json(),
            "data_type": kind.as_str(),
            "weather": weather,
        }))
    }

    #[instrument(skip(self, args), fields(city = %args.city_name))]
    async fn geocode_city(&self, args: CityArgs) -> Result<Value, ApplicationError> {
        let resolved = self.weather.geocode(&args.city_query()?).await?;
        Ok(resolved.to_json())
    }

    #[instrument(skip(self, args), fields(lat = args.lat, lon = args.lon))]
    async fn weather_by_coordinates(&self, args: CoordinateArgs) -> Result<Value, ApplicationError> {
        let location = GeoLocation::new(args.lat, args.lon)?;
        let kind = data_kind(args.data_type.as_deref())?;
        self.weather
            .fetch_weather(&location, kind, &exclude_parts(args.exclude))
            .await
    }

    #[instrument(skip(self, args), fields(lat = args.lat, lon = args.lon, start = args.start))]
    async fn historical_weather(&self, args: HistoryArgs) -> Result<Value, ApplicationError> {
        let location = GeoLocation::new(args.lat, args.lon)?;
        let granularity = granularity(args.data_type.as_deref())?;
        let count = granularity.clamp_count(args.cnt);
        if i64::from(count) != args.cnt {
            debug!(requested = args.cnt, count, "Clamped history count");
        }
        self.weather
            .fetch_history(
                &location,
                granularity,
                UnixTimestamp::from_secs(args.start),
                count,
            )
            .await
    }

    fn datetime_to_timestamp(args: &TimestampArgs) -> Result<Value, ApplicationError> {
        let timestamp = parse_timestamp(&args.dt)?;
        Ok(json!({ "timestamp": timestamp.as_secs() }))
    }
}
