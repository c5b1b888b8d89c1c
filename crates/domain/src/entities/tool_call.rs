//! Tool call requested by the completion provider

use serde::{Deserialize, Serialize};

/// A single function invocation requested by the model
///
/// `arguments` is the raw JSON text exactly as the provider sent it;
/// decoding happens when the tool is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back with the result
    pub id: String,
    /// Function name
    pub name: String,
    /// Raw JSON arguments
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}
