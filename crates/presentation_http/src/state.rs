//! Application state shared across handlers

use std::sync::Arc;

use application::AskService;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Tool-calling ask loop
    pub ask_service: Arc<AskService>,
}

impl AppState {
    /// Create state around an ask service
    pub const fn new(ask_service: Arc<AskService>) -> Self {
        Self { ask_service }
    }
}
