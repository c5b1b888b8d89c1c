//! Ask service - Tool-calling loop answering one weather question

use std::{fmt, sync::Arc, time::Instant};

use domain::{Answer, Question};
use tracing::{debug, info, instrument, warn};

use super::weather_tools::WeatherToolbox;
use crate::{
    error::ApplicationError,
    ports::{AssistantReply, CompletionPort, ConversationMessage},
};

/// Default instructions given to the model
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a weather assistant that retrieves data from OpenWeatherMap.
You can respond to questions about coordinates, weather conditions, and historical weather data.
Only respond to weather-related questions and address exactly what was asked - nothing more.
When asked about temperature, provide only temperature information.
When asked about precipitation, provide only precipitation information.
When asked about wind, provide only wind information.
And so on for other weather conditions.
Use the available tools to fetch accurate and current weather data.
If a city cannot be found, ask the user for the state or country code.
If asked about non-weather topics, politely explain that you can only provide weather information.";

/// Default cap on completion rounds per question
pub const DEFAULT_MAX_TOOL_ROUNDS: u32 = 8;

/// Settings for the ask loop
#[derive(Debug, Clone)]
pub struct AskConfig {
    /// System prompt sent before the question
    pub system_prompt: String,
    /// Maximum completion rounds before giving up
    pub max_tool_rounds: u32,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }
}

/// Answers weather questions by letting the model call weather tools
pub struct AskService {
    completion: Arc<dyn CompletionPort>,
    tools: WeatherToolbox,
    config: AskConfig,
}

impl fmt::Debug for AskService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AskService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AskService {
    /// Create a new ask service
    pub fn new(completion: Arc<dyn CompletionPort>, tools: WeatherToolbox, config: AskConfig) -> Self {
        Self {
            completion,
            tools,
            config,
        }
    }

    /// Answer one question
    ///
    /// Nothing is retained between calls.
    ///
    /// # Errors
    ///
    /// Fails when the completion provider fails, a tool hits a provider
    /// failure, the model returns an empty answer, or no final answer arrives
    /// within the configured number of rounds.
    #[instrument(skip(self, question), fields(question_len = question.char_len()))]
    pub async fn ask(&self, question: &Question) -> Result<Answer, ApplicationError> {
        let start = Instant::now();
        let tools = self.tools.definitions();
        let mut messages = vec![
            ConversationMessage::System(self.config.system_prompt.clone()),
            ConversationMessage::User(question.as_str().to_string()),
        ];
        let mut tool_calls = 0u32;

        for round in 1..=self.config.max_tool_rounds {
            let turn = self.completion.complete(&messages, &tools).await?;

            match turn.reply {
                AssistantReply::Text(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        return Err(ApplicationError::Inference(
                            "Model returned an empty answer".to_string(),
                        ));
                    }

                    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    info!(
                        model = %turn.model,
                        rounds = round,
                        tool_calls,
                        latency_ms,
                        "Question answered"
                    );

                    return Ok(Answer {
                        text: text.to_string(),
                        model: turn.model,
                        tool_calls,
                        rounds: round,
                        latency_ms,
                    });
                },
                AssistantReply::ToolCalls { content, calls } => {
                    debug!(round, requested = calls.len(), "Model requested tools");

                    let mut results = Vec::with_capacity(calls.len());
                    for call in &calls {
                        let output = self.tools.execute(call).await?;
                        tool_calls += 1;
                        results.push(ConversationMessage::Tool {
                            tool_call_id: call.id.clone(),
                            content: output,
                        });
                    }

                    messages.push(ConversationMessage::Assistant {
                        content,
                        tool_calls: calls,
                    });
                    messages.extend(results);
                },
            }
        }

        warn!(
            max_rounds = self.config.max_tool_rounds,
            tool_calls, "No final answer within round limit"
        );
        Err(ApplicationError::Inference(format!(
            "No final answer after {} rounds",
            self.config.max_tool_rounds
        )))
    }

    /// Check if the completion backend is healthy
    pub async fn completion_healthy(&self) -> bool {
        self.completion.is_healthy().await
    }

    /// Check if the weather backend is available
    pub async fn weather_available(&self) -> bool {
        self.tools.is_available().await
    }

    /// Get the current model name
    pub fn current_model(&self) -> String {
        self.completion.current_model()
    }
}
