//! OpenAI-compatible completion engine
//!
//! Talks to `/chat/completions` with function calling enabled. Works with
//! any server exposing the same API shape.

mod client;
mod wire;

pub use client::OpenAiCompletionEngine;
