//! Question value object with validation
//!
//! # Examples
//!
//! ```
//! use domain::Question;
//!
//! let question = Question::new("  What's the weather in Paris?  ").unwrap();
//! assert_eq!(question.as_str(), "What's the weather in Paris?");
//!
//! assert!(Question::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Maximum accepted question length in characters
pub const MAX_QUESTION_LENGTH: usize = 4000;

/// A trimmed, non-empty user question
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    #[validate(length(min = 1, max = 4000))]
    value: String,
}

impl Question {
    /// Create a new question, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuestion` if the trimmed text is empty or
    /// longer than [`MAX_QUESTION_LENGTH`] characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let value = text.into().trim().to_string();

        let candidate = Self { value };
        candidate.validate().map_err(|_| {
            DomainError::InvalidQuestion(format!(
                "question must be between 1 and {MAX_QUESTION_LENGTH} characters"
            ))
        })?;

        Ok(candidate)
    }

    /// Get the question as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Question> for String {
    fn from(question: Question) -> Self {
        question.value
    }
}

impl AsRef<str> for Question {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
