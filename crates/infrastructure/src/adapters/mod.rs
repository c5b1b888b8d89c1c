//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod completion_adapter;
mod weather_adapter;

pub use completion_adapter::OpenAiCompletionAdapter;
pub use weather_adapter::WeatherAdapter;
