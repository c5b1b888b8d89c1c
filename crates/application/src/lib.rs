//! Application layer - Use cases and orchestration
//!
//! Contains the weather tool catalogue, the tool-calling ask loop and the
//! port definitions that infrastructure adapters implement.

pub mod date_parser;
pub mod error;
pub mod ports;
pub mod services;

pub use date_parser::{parse_timestamp, parse_timestamp_at};
pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
