//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap APIs (<https://openweathermap.org/api>):
//! direct geocoding, current conditions, forecasts and historical data.
//! Weather payloads are returned as loosely-typed JSON and passed on unmodified.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{GeocodedLocation, Units};
