//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Question text is empty or too long
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    /// Coordinates outside the valid range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date/time parsing error
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_question_error_message() {
        let err = DomainError::InvalidQuestion("must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid question: must not be empty");
    }

    #[test]
    fn invalid_coordinates_error_message() {
        let err = DomainError::InvalidCoordinates("lat 91".to_string());
        assert_eq!(err.to_string(), "Invalid coordinates: lat 91");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("city name is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: city name is required");
    }

    #[test]
    fn invalid_datetime_error_message() {
        let err = DomainError::InvalidDateTime("not a date".to_string());
        assert_eq!(err.to_string(), "Invalid date/time: not a date");
    }
}
