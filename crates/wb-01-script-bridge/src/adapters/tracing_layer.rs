//! `tracing` layer mirroring application log events to the host.

use serde_json::Value;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::service::forwarder::MirrorGuard;
use crate::service::{BridgeContext, ConsoleLevel, SCRIPT_CONSOLE_TARGET};

/// Mirrors events at or above `max_level` to the host console functions.
///
/// The bridge's own diagnostics and the local console target are never
/// mirrored, and a mirror attempt that logs does not mirror again.
pub struct HostForwardingLayer {
    bridge: Arc<BridgeContext>,
    max_level: Level,
}

impl HostForwardingLayer {
    pub fn new(bridge: Arc<BridgeContext>) -> Self {
        Self {
            bridge,
            max_level: Level::INFO,
        }
    }

    /// Mirror events up to and including `level` in verbosity.
    pub fn with_max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }

    fn skips_target(target: &str) -> bool {
        target == SCRIPT_CONSOLE_TARGET || target.starts_with(env!("CARGO_CRATE_NAME"))
    }
}

fn console_level(level: &Level) -> ConsoleLevel {
    match *level {
        Level::ERROR => ConsoleLevel::Error,
        Level::WARN => ConsoleLevel::Warn,
        Level::INFO => ConsoleLevel::Info,
        _ => ConsoleLevel::Debug,
    }
}

impl<S> Layer<S> for HostForwardingLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level || Self::skips_target(metadata.target()) {
            return;
        }
        if !self.bridge.channel_available() {
            return;
        }
        let Some(_guard) = MirrorGuard::enter() else {
            return;
        };

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        self.bridge.notify(
            console_level(metadata.level()).host_function(),
            vec![Value::String(visitor.finish())],
        );
    }
}

/// Renders `message` followed by `key=value` pairs.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }
}

impl LineVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ManualTimerScheduler, RecordingChannel};
    use crate::domain::BridgeConfig;
    use serde_json::json;
    use tracing_subscriber::layer::SubscriberExt;

    fn setup() -> (Arc<BridgeContext>, Arc<RecordingChannel>) {
        let channel = Arc::new(RecordingChannel::new());
        let bridge = BridgeContext::new(
            BridgeConfig::default(),
            Arc::new(ManualTimerScheduler::new()),
        )
        .with_channel(channel.clone());
        (Arc::new(bridge), channel)
    }

    fn sent(channel: &RecordingChannel) -> Vec<Value> {
        channel
            .messages()
            .iter()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect()
    }

    #[test]
    fn test_mirrors_events_with_fields() {
        let (bridge, channel) = setup();
        let subscriber = tracing_subscriber::registry().with(HostForwardingLayer::new(bridge));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "app", attempts = 3, "retrying upload");
        });

        assert_eq!(
            sent(&channel),
            vec![json!({"func": "console.warn", "args": ["retrying upload attempts=3"]})]
        );
    }

    #[test]
    fn test_respects_max_level() {
        let (bridge, channel) = setup();
        let subscriber = tracing_subscriber::registry().with(HostForwardingLayer::new(bridge));

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "app", "too chatty");
            tracing::error!(target: "app", "kept");
        });

        let messages = sent(&channel);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["func"], "console.error");
    }

    #[test]
    fn test_skips_own_diagnostics_and_local_console() {
        let (bridge, channel) = setup();
        channel.fail_with("offline");
        let subscriber =
            tracing_subscriber::registry().with(HostForwardingLayer::new(bridge.clone()));

        tracing::subscriber::with_default(subscriber, || {
            // The failed send logs an error under this crate's target.
            bridge.notify("console.log", vec![json!("x")]);
            channel.recover();
            tracing::info!(target: "script_console", "local line");
        });

        assert!(channel.messages().is_empty());
    }
}
