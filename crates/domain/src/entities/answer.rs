//! Answer entity

use serde::{Deserialize, Serialize};

/// Final answer composed by the model for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Answer text
    pub text: String,
    /// Model that produced the answer
    pub model: String,
    /// Number of tool calls executed while answering
    pub tool_calls: u32,
    /// Number of completion rounds
    pub rounds: u32,
    /// Wall-clock time spent answering, in milliseconds
    pub latency_ms: u64,
}
