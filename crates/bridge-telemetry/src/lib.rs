//! # Bridge Telemetry
//!
//! Observability for both ends of the webview host bridge.
//!
//! ## Components
//!
//! - **Logging**: `tracing` subscriber with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters/gauges for calls, settlements and host jobs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // bridge and host runtime logs/metrics are now collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `webview-bridge` | Service name attached to logs |
//! | `WB_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `WB_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `WB_CONSOLE_OUTPUT` | `true` | Write logs to stdout at all |

mod config;
pub mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BRIDGE_CALLS_DISPATCHED,
    BRIDGE_CALLS_SETTLED, BRIDGE_PENDING_CALLS, BRIDGE_STALE_COMPLETIONS, HOST_JOBS,
    HOST_JOB_DURATION, HOST_SUBMIT_REJECTIONS,
};
pub use tracing_setup::{init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}
