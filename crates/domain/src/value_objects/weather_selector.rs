//! Selectors for which weather data to fetch

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Kind of present/future weather data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherDataKind {
    /// Current conditions
    #[default]
    Current,
    /// Multi-day forecast
    Forecast,
}

impl WeatherDataKind {
    /// Lowercase name as used in tool arguments
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Forecast => "forecast",
        }
    }
}

impl fmt::Display for WeatherDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherDataKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" | "now" | "weather" => Ok(Self::Current),
            "forecast" => Ok(Self::Forecast),
            other => Err(DomainError::ValidationError(format!(
                "unknown weather data type '{other}', expected 'current' or 'forecast'"
            ))),
        }
    }
}

/// Granularity of historical data points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryGranularity {
    /// One data point per hour
    #[default]
    Hour,
    /// One data point per day
    Day,
}

impl HistoryGranularity {
    /// Provider name for the granularity
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// Maximum number of data points the provider returns in one call
    pub const fn max_count(self) -> u32 {
        match self {
            Self::Hour => 24,
            Self::Day => 30,
        }
    }

    /// Clamp a requested count into `1..=max_count`
    pub fn clamp_count(self, requested: i64) -> u32 {
        let max = i64::from(self.max_count());
        u32::try_from(requested.clamp(1, max)).unwrap_or(1)
    }
}

impl fmt::Display for HistoryGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryGranularity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hourly" => Ok(Self::Hour),
            "day" | "daily" => Ok(Self::Day),
            other => Err(DomainError::ValidationError(format!(
                "unknown history type '{other}', expected 'hour' or 'day'"
            ))),
        }
    }
}
