//! Completion adapter - Implements CompletionPort using ai_core

use ai_core::{
    CompletionEngine, CompletionMessage, CompletionRequest, CompletionResponse, InferenceConfig,
    InferenceError, OpenAiCompletionEngine, ToolDefinition,
};
use application::{
    error::ApplicationError,
    ports::{AssistantReply, CompletionPort, CompletionTurn, ConversationMessage, ToolSpec},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for OpenAI-compatible chat completions
#[derive(Debug)]
pub struct OpenAiCompletionAdapter {
    engine: OpenAiCompletionEngine,
}

impl OpenAiCompletionAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the API key is missing.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiCompletionEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
            InferenceError::Unauthorized(msg) => ApplicationError::UpstreamAuth(format!(
                "Completion provider rejected the API key: {msg}"
            )),
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Completion provider unreachable: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Completion timeout after {ms}ms"))
            },
            InferenceError::ServerError(msg) => ApplicationError::ExternalService(msg),
            other => ApplicationError::Inference(other.to_string()),
        }
    }

    fn to_message(message: &ConversationMessage) -> CompletionMessage {
        match message {
            ConversationMessage::System(text) => CompletionMessage::system(text.as_str()),
            ConversationMessage::User(text) => CompletionMessage::user(text.as_str()),
            ConversationMessage::Assistant {
                content,
                tool_calls,
            } if tool_calls.is_empty() => {
                CompletionMessage::assistant(content.clone().unwrap_or_default())
            },
            ConversationMessage::Assistant {
                content,
                tool_calls,
            } => CompletionMessage::assistant_tool_calls(content.clone(), tool_calls.clone()),
            ConversationMessage::Tool {
                tool_call_id,
                content,
            } => CompletionMessage::tool(tool_call_id.as_str(), content.as_str()),
        }
    }

    fn to_tool(spec: &ToolSpec) -> ToolDefinition {
        ToolDefinition {
            name: spec.name.clone(),
            description: spec.description.clone(),
            parameters: spec.parameters.clone(),
        }
    }

    fn to_turn(response: CompletionResponse) -> CompletionTurn {
        let tokens_used = response.usage.map(|u| u.total_tokens);
        let reply = if response.requests_tools() {
            AssistantReply::ToolCalls {
                content: response.content,
                calls: response.tool_calls,
            }
        } else {
            AssistantReply::Text(response.content.unwrap_or_default())
        };

        CompletionTurn {
            reply,
            model: response.model,
            tokens_used,
        }
    }
}

#[async_trait]
impl CompletionPort for OpenAiCompletionAdapter {
    #[instrument(skip_all, fields(messages = messages.len(), tools = tools.len()))]
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSpec],
    ) -> Result<CompletionTurn, ApplicationError> {
        let request = CompletionRequest::new(messages.iter().map(Self::to_message).collect())
            .with_tools(tools.iter().map(Self::to_tool).collect());

        let response = self
            .engine
            .complete(request)
            .await
            .map_err(Self::map_error)?;

        debug!(
            model = %response.model,
            tool_calls = response.tool_calls.len(),
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Completion round finished"
        );

        Ok(Self::to_turn(response))
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Completion health check failed");
                false
            },
        }
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use ai_core::{MessageRole, TokenUsage};
    use domain::ToolCall;

    use super::*;

    #[test]
    fn requires_api_key() {
        let result = OpenAiCompletionAdapter::new(InferenceConfig::default());
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn maps_conversation_roles() {
        let call = ToolCall::new("call_1", "geocode_city", r#"{"city_name":"Paris"}"#);
        let messages = [
            ConversationMessage::System("be brief".into()),
            ConversationMessage::User("Paris?".into()),
            ConversationMessage::Assistant {
                content: None,
                tool_calls: vec![call.clone()],
            },
            ConversationMessage::Tool {
                tool_call_id: "call_1".into(),
                content: "{}".into(),
            },
        ];

        let mapped: Vec<_> = messages
            .iter()
            .map(OpenAiCompletionAdapter::to_message)
            .collect();

        assert_eq!(mapped[0].role, MessageRole::System);
        assert_eq!(mapped[1].content.as_deref(), Some("Paris?"));
        assert_eq!(mapped[2].role, MessageRole::Assistant);
        assert_eq!(mapped[2].tool_calls, vec![call]);
        assert!(mapped[2].content.is_none());
        assert_eq!(mapped[3].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn plain_assistant_message_keeps_text() {
        let mapped = OpenAiCompletionAdapter::to_message(&ConversationMessage::Assistant {
            content: Some("Earlier answer".into()),
            tool_calls: Vec::new(),
        });
        assert_eq!(mapped.content.as_deref(), Some("Earlier answer"));
        assert!(mapped.tool_calls.is_empty());
    }

    #[test]
    fn text_response_becomes_text_reply() {
        let turn = OpenAiCompletionAdapter::to_turn(CompletionResponse {
            content: Some("Sunny, 21°C".into()),
            tool_calls: Vec::new(),
            model: "gpt-4o-mini".into(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            finish_reason: Some("stop".into()),
        });

        assert_eq!(turn.reply, AssistantReply::Text("Sunny, 21°C".into()));
        assert_eq!(turn.tokens_used, Some(15));
    }

    #[test]
    fn tool_response_becomes_tool_calls_reply() {
        let call = ToolCall::new("call_9", "datetime_to_timestamp", "{}");
        let turn = OpenAiCompletionAdapter::to_turn(CompletionResponse {
            content: None,
            tool_calls: vec![call.clone()],
            model: "gpt-4o-mini".into(),
            usage: None,
            finish_reason: Some("tool_calls".into()),
        });

        assert_eq!(
            turn.reply,
            AssistantReply::ToolCalls {
                content: None,
                calls: vec![call]
            }
        );
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            OpenAiCompletionAdapter::map_error(InferenceError::Unauthorized("bad key".into())),
            ApplicationError::UpstreamAuth(_)
        ));
        assert!(matches!(
            OpenAiCompletionAdapter::map_error(InferenceError::RateLimited),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            OpenAiCompletionAdapter::map_error(InferenceError::Timeout(500)),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            OpenAiCompletionAdapter::map_error(InferenceError::InvalidResponse("eof".into())),
            ApplicationError::Inference(_)
        ));
    }
}
