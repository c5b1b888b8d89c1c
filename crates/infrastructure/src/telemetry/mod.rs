//! Logging and distributed tracing infrastructure
//!
//! Sets up the `tracing` subscriber (text or JSON console output) and the
//! optional OpenTelemetry span export to an OTLP collector.

mod format;
mod otel;

pub use format::LogFormat;
pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
