//! Domain entities - Objects produced during one ask request

mod answer;
mod tool_call;

pub use answer::Answer;
pub use tool_call::ToolCall;
