//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `completion`: completion provider and ask loop settings
//! - `weather`: OpenWeatherMap settings
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml` in the working directory, then environment variables
//! prefixed `WEATHER_ASSISTANT_` with `__` between nested keys
//! (e.g. `WEATHER_ASSISTANT_SERVER__PORT=8080`).

mod completion;
mod server;
mod weather;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use completion::CompletionAppConfig;
pub use server::ServerConfig;
pub use weather::WeatherAppConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "WEATHER_ASSISTANT";

/// Unprefixed variable names accepted for compatibility, with the key each
/// one sets. A prefixed variable for the same key wins.
const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "completion.api_key"),
    ("OPENAI_BASE_URL", "completion.base_url"),
    ("WEATHER_API_KEY", "weather.api_key"),
    ("OPENWEATHER_ONECALL_API_URL", "weather.current_url"),
];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required API key is not set
    #[error("Missing {what}: set {env_var} or {prefixed}")]
    MissingApiKey {
        what: &'static str,
        env_var: &'static str,
        prefixed: String,
    },
}

/// Application environment (development or production)
///
/// Production hides internal error details from API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - error details included in responses
    #[default]
    Development,
    /// Production environment - internal details withheld
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion provider configuration
    #[serde(default)]
    pub completion: CompletionAppConfig,

    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Logging and trace export configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load and validate configuration from the process environment and
    /// optional `config.toml`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(std::env::vars().collect())
    }

    /// Load and validate configuration using `vars` as the environment
    pub fn load_from(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., WEATHER_ASSISTANT_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true)
                    .source(Some(vars.clone())),
            );

        for (var, key) in LEGACY_ENV_VARS {
            if vars.contains_key(&prefixed_var(key)) {
                continue;
            }
            if let Some(value) = vars.get(*var).filter(|v| !v.trim().is_empty()) {
                debug!(var = %var, key = %key, "Using legacy environment variable");
                builder = builder.set_override(*key, value.clone())?;
            }
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both provider API keys are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.completion.has_api_key() {
            return Err(ConfigError::MissingApiKey {
                what: "completion API key",
                env_var: "OPENAI_API_KEY",
                prefixed: prefixed_var("completion.api_key"),
            });
        }
        if !self.weather.has_api_key() {
            return Err(ConfigError::MissingApiKey {
                what: "weather API key",
                env_var: "WEATHER_API_KEY",
                prefixed: prefixed_var("weather.api_key"),
            });
        }
        Ok(())
    }

    /// Whether the service runs in production mode
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Environment variable name for a dotted config key
fn prefixed_var(key: &str) -> String {
    format!("{ENV_PREFIX}_{}", key.replace('.', "__").to_uppercase())
}
