//! # Console Mirroring and Window Control
//!
//! Fire-and-forget traffic from the script side:
//!
//! 1. `ConsoleForwarder` output reaches the host's `console.*` functions
//! 2. `HostForwardingLayer` mirrors application `tracing` events
//! 3. `WindowRuntime` calls drive the host's window

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tracing_subscriber::layer::SubscriberExt;

    use shared_wire::functions;
    use wb_01_script_bridge::{ConsoleForwarder, HostForwardingLayer, WindowRuntime};
    use wb_02_host_runtime::{FunctionRegistry, HostConfig, WindowCommand};

    use crate::Loopback;

    type Captured = Arc<Mutex<Vec<(String, Vec<Value>)>>>;

    /// Single worker so host functions run in arrival order.
    fn ordered_loopback(captured: Captured) -> Loopback {
        Loopback::start(
            Duration::from_secs(30),
            HostConfig::default().with_worker_count(1),
            move |registry: &mut FunctionRegistry| {
                for name in functions::CONSOLE_FUNCTIONS {
                    let captured = Arc::clone(&captured);
                    registry.register_fn(name, move |ctx, args| {
                        captured.lock().push((ctx.func().to_string(), args));
                        Ok(Value::Null)
                    });
                }
                registry.register_fn("sync", |_ctx, _args| Ok(Value::Null));
            },
        )
    }

    /// Round-trip a call so everything sent before it has been handled.
    async fn barrier(lb: &Loopback) {
        lb.bridge.call("sync", vec![]).await.unwrap();
    }

    #[tokio::test]
    async fn test_console_forwarder_reaches_host() {
        let captured = Captured::default();
        let lb = ordered_loopback(Arc::clone(&captured));
        let console = ConsoleForwarder::new(Arc::clone(&lb.bridge));

        console.log(vec![json!("ready"), json!(3)]);
        console.error(vec![json!({"code": 7})]);
        barrier(&lb).await;

        assert_eq!(
            *captured.lock(),
            vec![
                ("console.log".to_string(), vec![json!("ready"), json!(3)]),
                ("console.error".to_string(), vec![json!({"code": 7})]),
            ]
        );
        lb.shutdown().await;
    }

    #[tokio::test]
    async fn test_tracing_layer_mirrors_application_events() {
        let captured = Captured::default();
        let lb = ordered_loopback(Arc::clone(&captured));
        let subscriber = tracing_subscriber::registry()
            .with(HostForwardingLayer::new(Arc::clone(&lb.bridge)));
        let _default = tracing::subscriber::set_default(subscriber);

        tracing::warn!(target: "editor", file = "a.txt", "unsaved changes");
        barrier(&lb).await;

        let mirrored: Vec<_> = captured
            .lock()
            .iter()
            .filter(|(func, _)| func == "console.warn")
            .cloned()
            .collect();
        assert!(mirrored.contains(&(
            "console.warn".to_string(),
            vec![json!("unsaved changes file=a.txt")]
        )));
        lb.shutdown().await;
    }

    #[tokio::test]
    async fn test_window_runtime_drives_host_window() {
        let lb = ordered_loopback(Captured::default());
        let window = WindowRuntime::new(Arc::clone(&lb.bridge));

        window.set_title("Notes");
        window.set_size(1280, 720);
        window.set_size(10, 10);
        window.set_fullscreen(true);
        window.begin_drag_at(4.0, 8.5);
        window.minimize();
        window.close();
        barrier(&lb).await;

        // The undersized request is rejected by the host and only logged there.
        assert_eq!(
            lb.window.commands(),
            vec![
                WindowCommand::SetTitle("Notes".into()),
                WindowCommand::SetSize {
                    width: 1280,
                    height: 720
                },
                WindowCommand::SetFullscreen(true),
                WindowCommand::BeginDragAt { x: 4.0, y: 8.5 },
                WindowCommand::Minimize,
                WindowCommand::Close,
            ]
        );
        lb.shutdown().await;
    }
}
