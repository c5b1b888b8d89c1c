//! Ask handler

use application::ApplicationError;
use axum::{Extension, Json, extract::State};
use domain::Question;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{RequestId, ValidatedJson},
    state::AppState,
};

/// Ask request body
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    /// Natural-language weather question
    #[validate(length(min = 1, max = 4000, message = "must be between 1 and 4000 characters"))]
    pub question: String,
}

/// Ask response body
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    /// The assistant's answer
    pub response: String,
    /// Model that produced the answer
    pub model: String,
    /// Number of tool calls executed
    pub tool_calls: u32,
    /// Completion rounds used
    pub rounds: u32,
    /// End-to-end latency in milliseconds
    pub latency_ms: u64,
}

/// Answer a weather question
#[instrument(skip_all, fields(request_id = %request_id, question_len = request.question.chars().count()))]
pub async fn ask(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ValidatedJson(request): ValidatedJson<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = Question::new(request.question).map_err(ApplicationError::from)?;

    let answer = state.ask_service.ask(&question).await?;

    info!(
        model = %answer.model,
        tool_calls = answer.tool_calls,
        rounds = answer.rounds,
        latency_ms = answer.latency_ms,
        "Answered question"
    );

    Ok(Json(AskResponse {
        response: answer.text,
        model: answer.model,
        tool_calls: answer.tool_calls,
        rounds: answer.rounds,
        latency_ms: answer.latency_ms,
    }))
}

#[cfg(test)]
mod tests {
    use domain::MAX_QUESTION_LENGTH;

    use super::*;

    #[test]
    fn request_validation_bounds() {
        let ok = AskRequest {
            question: "Will it rain in Oslo tomorrow?".into(),
        };
        assert!(ok.validate().is_ok());

        let empty = AskRequest {
            question: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = AskRequest {
            question: "a".repeat(MAX_QUESTION_LENGTH + 1),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn response_serializes_response_field() {
        let json = serde_json::to_value(AskResponse {
            response: "Sunny".into(),
            model: "gpt-4o-mini".into(),
            tool_calls: 2,
            rounds: 3,
            latency_ms: 840,
        })
        .unwrap();

        assert_eq!(json["response"], "Sunny");
        assert_eq!(json["tool_calls"], 2);
    }
}
