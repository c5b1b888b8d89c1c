//! Completion provider configuration.

use ai_core::InferenceConfig;
use application::{AskConfig, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// OpenAI-compatible completion provider settings
#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionAppConfig {
    /// API base URL, including the version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model used for every round
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Completion rounds allowed per question
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: u32,

    /// Replaces the built-in weather assistant instructions
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_base_url() -> String {
    InferenceConfig::default().base_url
}

fn default_model() -> String {
    InferenceConfig::default().default_model
}

fn default_timeout_ms() -> u64 {
    InferenceConfig::default().timeout_ms
}

fn default_temperature() -> f32 {
    InferenceConfig::default().temperature
}

fn default_max_tokens() -> u32 {
    InferenceConfig::default().max_tokens
}

const fn default_max_tool_rounds() -> u32 {
    DEFAULT_MAX_TOOL_ROUNDS
}

impl Default for CompletionAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_tool_rounds: default_max_tool_rounds(),
            system_prompt: None,
        }
    }
}

impl std::fmt::Debug for CompletionAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_tool_rounds", &self.max_tool_rounds)
            .field("system_prompt", &self.system_prompt.as_ref().map(String::len))
            .finish()
    }
}

impl CompletionAppConfig {
    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Convert to `ai_core`'s `InferenceConfig`
    #[must_use]
    pub fn to_inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            default_model: self.model.clone(),
            timeout_ms: self.timeout_ms,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    /// Settings for the ask loop
    #[must_use]
    pub fn to_ask_config(&self) -> AskConfig {
        AskConfig {
            system_prompt: self
                .system_prompt
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tool_rounds: self.max_tool_rounds.max(1),
        }
    }
}
