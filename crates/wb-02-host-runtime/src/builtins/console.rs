//! `console.*`: script console lines written into the host log.

use async_trait::async_trait;
use serde_json::Value;
use shared_wire::console::render_line;
use shared_wire::functions;
use tracing::Level;

use crate::domain::{CallContext, HandlerError};
use crate::ports::HostFunction;
use crate::service::FunctionRegistry;

/// Log target for lines coming from the script console.
pub const SCRIPT_CONSOLE_TARGET: &str = "script_console";

/// Logs its arguments as one line at a fixed level and returns `null`.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFunction {
    level: Level,
}

impl ConsoleFunction {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

#[async_trait]
impl HostFunction for ConsoleFunction {
    async fn call(&self, _ctx: &CallContext, args: Vec<Value>) -> Result<Value, HandlerError> {
        let line = render_line(&args);
        match self.level {
            Level::ERROR => tracing::error!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
            Level::WARN => tracing::warn!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
            Level::INFO => tracing::info!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
            _ => tracing::debug!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
        }
        Ok(Value::Null)
    }
}

/// Install `console.debug|info|log|warn|error`. `log` maps to info.
pub fn register_console(registry: &mut FunctionRegistry) {
    let levels = [
        (functions::CONSOLE_DEBUG, Level::DEBUG),
        (functions::CONSOLE_INFO, Level::INFO),
        (functions::CONSOLE_LOG, Level::INFO),
        (functions::CONSOLE_WARN, Level::WARN),
        (functions::CONSOLE_ERROR, Level::ERROR),
    ];
    for (name, level) in levels {
        registry.register(name, std::sync::Arc::new(ConsoleFunction::new(level)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::io;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registers_all_console_functions() {
        let mut registry = FunctionRegistry::new();
        register_console(&mut registry);
        for name in functions::CONSOLE_FUNCTIONS {
            assert!(registry.contains(name), "{name} missing");
        }
    }

    #[tokio::test]
    async fn test_writes_joined_line_at_level() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .finish();
        let _default = tracing::subscriber::set_default(subscriber);

        let ctx = CallContext::new(
            functions::CONSOLE_WARN,
            None,
            Instant::now() + Duration::from_secs(1),
        );
        let result = ConsoleFunction::new(Level::WARN)
            .call(&ctx, vec![json!("disk"), json!(93), json!({"unit": "%"})])
            .await;
        assert_eq!(result, Ok(Value::Null));

        let output = String::from_utf8(buffer.0.lock().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains(SCRIPT_CONSOLE_TARGET));
        assert!(output.contains(r#"disk 93 {"unit":"%"}"#));
    }
}
