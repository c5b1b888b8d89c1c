//! Completion port - Interface for tool-calling chat completions

use async_trait::async_trait;
use domain::ToolCall;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// One message of the conversation sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationMessage {
    /// System instruction
    System(String),
    /// The user's question
    User(String),
    /// Assistant turn, possibly requesting tools
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    /// Output of one tool call
    Tool {
        tool_call_id: String,
        content: String,
    },
}

/// A function offered to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object
    pub parameters: serde_json::Value,
}

/// What the model answered in one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    /// Final natural-language answer
    Text(String),
    /// The model wants tool results before answering
    ToolCalls {
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
}

/// Result of one completion round
#[derive(Debug, Clone)]
pub struct CompletionTurn {
    pub reply: AssistantReply,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
}

/// Port for completion operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Run one completion round over the conversation so far
    async fn complete(
        &self,
        messages: &[ConversationMessage],
        tools: &[ToolSpec],
    ) -> Result<CompletionTurn, ApplicationError>;

    /// Check if the completion backend is healthy
    async fn is_healthy(&self) -> bool;

    /// Get the name of the current model
    fn current_model(&self) -> String;
}
