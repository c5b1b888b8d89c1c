//! Weather assistant HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context as _;
use application::{AskService, CompletionPort, WeatherPort, WeatherToolbox};
use infrastructure::{AppConfig, OpenAiCompletionAdapter, WeatherAdapter, init_telemetry};
use presentation_http::{
    create_router, server::serve_with_shutdown, set_expose_internal_errors, state::AppState,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let _telemetry = init_telemetry(&config.telemetry, config.server.log_format)
        .context("Failed to initialize telemetry")?;

    info!("Weather assistant v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        model = %config.completion.model,
        units = %config.weather.units,
        "Configuration loaded"
    );

    set_expose_internal_errors(!config.is_production());

    let completion: Arc<dyn CompletionPort> = Arc::new(
        OpenAiCompletionAdapter::new(config.completion.to_inference_config())
            .context("Failed to initialize completion adapter")?,
    );
    let weather: Arc<dyn WeatherPort> = Arc::new(
        WeatherAdapter::with_config(config.weather.to_weather_config())
            .context("Failed to initialize weather adapter")?,
    );

    let ask_service = AskService::new(
        completion,
        WeatherToolbox::new(weather),
        config.completion.to_ask_config(),
    );

    let app = create_router(AppState::new(Arc::new(ask_service)), &config.server)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    serve_with_shutdown(listener, app, shutdown_signal(), shutdown_timeout).await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
