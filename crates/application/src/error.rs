//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// An upstream provider rejected our credentials
    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Requested data does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation cannot be performed with the given input
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error stems from the input rather than from a provider
    /// failure, so the model can correct itself when told about it
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(_)
                | ApplicationError::NotFound(_)
                | ApplicationError::InvalidOperation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors() {
        assert!(ApplicationError::NotFound("Springfield".into()).is_input_error());
        assert!(ApplicationError::InvalidOperation("bad args".into()).is_input_error());
        assert!(
            ApplicationError::Domain(DomainError::InvalidDateTime("x".into())).is_input_error()
        );
        assert!(!ApplicationError::UpstreamAuth("401".into()).is_input_error());
        assert!(!ApplicationError::RateLimited.is_input_error());
        assert!(!ApplicationError::ExternalService("503".into()).is_input_error());
    }

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::InvalidQuestion("empty".into()).into();
        assert_eq!(err.to_string(), "Invalid question: empty");
    }
}
