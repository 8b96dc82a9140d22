//! Tracing subscriber installation.

use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::{TelemetryConfig, TelemetryError};

type OutputLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Marker that the global subscriber was installed by [`init_tracing`].
pub struct TracingGuard {
    service_name: String,
}

impl TracingGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> Result<TracingGuard, TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    tracing_subscriber::registry()
        .with(output_layer(config))
        .with(filter)
        .try_init()
        .map_err(|e| TelemetryError::TracingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Tracing initialized"
    );

    Ok(TracingGuard {
        service_name: config.service_name.clone(),
    })
}

/// Where log lines go: nowhere, JSON lines for shipping, or compact text
/// for a developer terminal.
fn output_layer(config: &TelemetryConfig) -> Option<OutputLayer> {
    if !config.console_output {
        return None;
    }
    let layer = if config.json_logs {
        fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .boxed()
    } else {
        fmt::layer().compact().with_target(true).boxed()
    };
    Some(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_layer_follows_config() {
        let silent = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        };
        assert!(output_layer(&silent).is_none());

        let json = TelemetryConfig {
            json_logs: true,
            ..TelemetryConfig::default()
        };
        assert!(output_layer(&json).is_some());
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        // Only reachable when RUST_LOG is unset; otherwise RUST_LOG wins.
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "wb_bridge=verbose".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            init_tracing(&config),
            Err(TelemetryError::Config(_))
        ));
    }
}
