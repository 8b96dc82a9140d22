//! Both ends of the bridge in one process.
//!
//! ```text
//! BridgeContext ──MpscChannel──► HostRuntime::serve ──► WorkerPool
//!       ▲                                                   │
//!       └──── handle_reply ◄── reply pump ◄── ChannelReplySink
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use wb_01_script_bridge::{BridgeConfig, BridgeContext, MpscChannel, TokioTimerScheduler};
use wb_02_host_runtime::builtins::{register_console, register_window};
use wb_02_host_runtime::{ChannelReplySink, FunctionRegistry, HostConfig, HostRuntime, RecordingWindow};

/// A script bridge wired to a host runtime through in-process channels.
pub struct Loopback {
    pub bridge: Arc<BridgeContext>,
    pub host: Arc<HostRuntime>,
    pub window: Arc<RecordingWindow>,
    server: JoinHandle<()>,
    pump: JoinHandle<()>,
}

impl Loopback {
    /// Start both sides with the built-in functions, then let `configure`
    /// add or replace host functions.
    ///
    /// Must run inside a tokio runtime.
    pub fn start<F>(call_timeout: Duration, host_config: HostConfig, configure: F) -> Self
    where
        F: FnOnce(&mut FunctionRegistry),
    {
        let window = Arc::new(RecordingWindow::new());
        let mut registry = FunctionRegistry::new();
        register_console(&mut registry);
        register_window(&mut registry, window.clone());
        configure(&mut registry);

        let (sink, mut replies) = ChannelReplySink::pair();
        let host = Arc::new(HostRuntime::start(host_config, registry, Arc::new(sink)));

        let (channel, requests) = MpscChannel::pair();
        let scheduler = TokioTimerScheduler::current().expect("inside a tokio runtime");
        let bridge = Arc::new(
            BridgeContext::new(
                BridgeConfig::default().with_call_timeout(call_timeout),
                Arc::new(scheduler),
            )
            .with_channel(Arc::new(channel)),
        );

        let server = Arc::clone(&host).serve(requests);
        let pump_bridge = Arc::clone(&bridge);
        let pump = tokio::spawn(async move {
            while let Some(reply) = replies.recv().await {
                pump_bridge.handle_reply(reply);
            }
        });

        Self {
            bridge,
            host,
            window,
            server,
            pump,
        }
    }

    /// Defaults on both sides and only the built-in functions.
    pub fn with_builtins() -> Self {
        Self::start(Duration::from_secs(30), HostConfig::default(), |_| {})
    }

    /// Stop the host side after finishing queued work.
    pub async fn shutdown(self) {
        self.bridge.detach_channel();
        self.host.shutdown().await;
        self.server.abort();
        self.pump.abort();
    }
}
