//! Domain layer for the weather assistant
//!
//! Contains the value objects and entities that describe a single
//! question/answer exchange: questions, city lookups, coordinates,
//! weather selectors, tool calls and answers.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
