//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub completion: CompletionStatus,
    pub weather: WeatherStatus,
}

/// Status of the completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub healthy: bool,
    pub model: Option<String>,
}

/// Status of the weather provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherStatus {
    pub healthy: bool,
}

/// Readiness check - can both providers be reached?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (completion_healthy, weather_healthy) = tokio::join!(
        state.ask_service.completion_healthy(),
        state.ask_service.weather_available()
    );

    let ready = completion_healthy && weather_healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            completion: CompletionStatus {
                healthy: completion_healthy,
                model: completion_healthy.then(|| state.ask_service.current_model()),
            },
            weather: WeatherStatus {
                healthy: weather_healthy,
            },
        }),
    )
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

/// Fallback for known routes hit with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
