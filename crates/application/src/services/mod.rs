//! Application services - Use case implementations

mod ask_service;
mod weather_tools;

pub use ask_service::{AskConfig, AskService, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT};
pub use weather_tools::{WeatherToolbox, tool_names};
