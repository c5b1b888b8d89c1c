//! Wire format of the chat completions API

use domain::ToolCall;
use serde::{Deserialize, Serialize};

use crate::ports::{CompletionMessage, MessageRole, ToolDefinition};

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct WireMessage<'a> {
    role: MessageRole,
    // `content: null` is required on assistant tool-call messages
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCallRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

impl<'a> From<&'a CompletionMessage> for WireMessage<'a> {
    fn from(msg: &'a CompletionMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.as_deref(),
            tool_calls: msg
                .tool_calls
                .iter()
                .map(|call| WireToolCallRef {
                    id: &call.id,
                    kind: "function",
                    function: WireFunctionRef {
                        name: &call.name,
                        arguments: &call.arguments,
                    },
                })
                .collect(),
            tool_call_id: msg.tool_call_id.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireToolCallRef<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionRef<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunctionRef<'a> {
    name: &'a str,
    arguments: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

impl<'a> From<&'a ToolDefinition> for WireTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: tool,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseToolCall {
    pub id: String,
    pub function: ResponseFunction,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

impl From<ResponseToolCall> for ToolCall {
    fn from(call: ResponseToolCall) -> Self {
        Self::new(call.id, call.function.name, call.function.arguments)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_tool_call_message_serializes_null_content() {
        let msg = CompletionMessage::assistant_tool_calls(
            None,
            vec![ToolCall::new("call_1", "geocode_city", r#"{"city_name":"Oslo"}"#)],
        );
        let json = serde_json::to_value(WireMessage::from(&msg)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "geocode_city", "arguments": "{\"city_name\":\"Oslo\"}"}
                }]
            })
        );
    }

    #[test]
    fn tool_message_serializes_call_id() {
        let msg = CompletionMessage::tool("call_1", "{}");
        let json = serde_json::to_value(WireMessage::from(&msg)).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn tool_definition_is_wrapped_as_function() {
        let tool = ToolDefinition {
            name: "datetime_to_utc_timestamp".to_string(),
            description: "Convert".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };
        let json = serde_json::to_value(WireTool::from(&tool)).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "datetime_to_utc_timestamp");
    }

    #[test]
    fn response_with_tool_calls_parses() {
        let json = serde_json::json!({
            "id": "chatcmpl-1",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "get_weather_by_city", "arguments": "{\"city_name\":\"Paris\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });
        let resp: ChatResponse = serde_json::from_value(json).unwrap();
        let calls = resp.choices[0].message.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "get_weather_by_city");
    }
}
