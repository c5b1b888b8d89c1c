//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the OpenAI and OpenWeatherMap adapters, configuration loading
//! and logging/tracing setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, CompletionAppConfig, ConfigError, Environment, ServerConfig, WeatherAppConfig,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryGuard, init_telemetry};
