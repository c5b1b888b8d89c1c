//! AI Core - Chat completion with function calling
//!
//! Provides abstractions for tool-calling chat completions against an
//! OpenAI-compatible API (`/chat/completions`).

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiCompletionEngine;
pub use ports::{
    CompletionEngine, CompletionMessage, CompletionRequest, CompletionResponse, MessageRole,
    TokenUsage, ToolDefinition,
};
