//! OpenWeatherMap configuration.

use integration_weather::{Units, WeatherConfig};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Weather provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Full URL replacing the current-conditions endpoint
    #[serde(default)]
    pub current_url: Option<String>,

    /// Units of measurement
    #[serde(default)]
    pub units: Units,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    WeatherConfig::default().base_url
}

fn default_timeout_secs() -> u64 {
    WeatherConfig::default().timeout_secs
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            current_url: None,
            units: Units::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for WeatherAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("current_url", &self.current_url)
            .field("units", &self.units)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl WeatherAppConfig {
    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Convert to `integration_weather`'s `WeatherConfig`
    #[must_use]
    pub fn to_weather_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            current_url: self
                .current_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            units: self.units,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_weather_config() {
        let config = WeatherAppConfig {
            api_key: Some(SecretString::from("owm-key")),
            current_url: Some("https://api.openweathermap.org/data/3.0/onecall".to_string()),
            units: Units::Imperial,
            ..WeatherAppConfig::default()
        };

        let weather = config.to_weather_config();
        assert_eq!(weather.api_key.as_deref(), Some("owm-key"));
        assert_eq!(
            weather.current_url.as_deref(),
            Some("https://api.openweathermap.org/data/3.0/onecall")
        );
        assert_eq!(weather.units, Units::Imperial);
        assert_eq!(weather.base_url, "https://api.openweathermap.org");
    }

    #[test]
    fn empty_current_url_is_ignored() {
        let config = WeatherAppConfig {
            current_url: Some(String::new()),
            ..WeatherAppConfig::default()
        };
        assert!(config.to_weather_config().current_url.is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = WeatherAppConfig {
            api_key: Some(SecretString::from("owm-secret")),
            ..WeatherAppConfig::default()
        };
        assert!(!format!("{config:?}").contains("owm-secret"));
    }
}
