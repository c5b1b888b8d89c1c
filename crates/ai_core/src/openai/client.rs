//! OpenAI chat completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::wire::{ChatRequest, ChatResponse, ErrorEnvelope, WireMessage, WireTool};
use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{CompletionEngine, CompletionRequest, CompletionResponse, TokenUsage};

/// Completion engine backed by an OpenAI-compatible `/chat/completions` API
pub struct OpenAiCompletionEngine {
    client: Client,
    config: InferenceConfig,
    api_key: String,
}

impl std::fmt::Debug for OpenAiCompletionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompletionEngine {
    /// Create a new completion engine
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InferenceError::Configuration("API key is required".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            "Initialized OpenAI completion engine"
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    /// Map a non-success response to an error, reading the provider message
    async fn error_for_status(response: Response) -> InferenceError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("HTTP {status}"));

        warn!(status = %status, message = %message, "Completion request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                InferenceError::Unauthorized(message)
            },
            StatusCode::NOT_FOUND => InferenceError::ModelNotAvailable(message),
            StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
            s if s.is_server_error() => InferenceError::ServerError(format!("Status {s}: {message}")),
            _ => InferenceError::RequestFailed(message),
        }
    }
}

#[async_trait]
impl CompletionEngine for OpenAiCompletionEngine {
    #[instrument(
        skip(self, request),
        fields(
            model = %self.resolve_model(&request),
            messages = request.messages.len(),
            tools = request.tools.len()
        )
    )]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, InferenceError> {
        let model = self.resolve_model(&request);

        let body = ChatRequest {
            model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools: request.tools.iter().map(WireTool::from).collect(),
            tool_choice: (!request.tools.is_empty()).then_some("auto"),
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
        };

        debug!("Sending chat completion request");

        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let model = chat.model.unwrap_or_else(|| model.to_string());
        let usage = chat.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("No choices in response".to_string()))?;

        let tool_calls: Vec<_> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();

        debug!(
            tool_calls = tool_calls.len(),
            finish_reason = ?choice.finish_reason,
            tokens = ?usage,
            "Chat completion finished"
        );

        Ok(CompletionResponse {
            content: choice.message.content,
            tool_calls,
            model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) if e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
