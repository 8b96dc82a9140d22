//! Console forwarding.
//!
//! Every console call is written to the local console first and
//! unconditionally. A best-effort copy then goes to the host as a
//! fire-and-forget call. Forwarding never fails the caller and never
//! recurses into itself.

use serde_json::Value;
use shared_wire::console::render_line;
use shared_wire::functions;
use std::cell::Cell;
use std::sync::Arc;

use crate::service::BridgeContext;

/// Target under which the local console writes its lines.
pub const SCRIPT_CONSOLE_TARGET: &str = "script_console";

/// Console severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl ConsoleLevel {
    pub const ALL: [ConsoleLevel; 5] = [
        ConsoleLevel::Debug,
        ConsoleLevel::Info,
        ConsoleLevel::Log,
        ConsoleLevel::Warn,
        ConsoleLevel::Error,
    ];

    /// Host function receiving the mirrored output.
    pub fn host_function(self) -> &'static str {
        match self {
            ConsoleLevel::Debug => functions::CONSOLE_DEBUG,
            ConsoleLevel::Info => functions::CONSOLE_INFO,
            ConsoleLevel::Log => functions::CONSOLE_LOG,
            ConsoleLevel::Warn => functions::CONSOLE_WARN,
            ConsoleLevel::Error => functions::CONSOLE_ERROR,
        }
    }
}

/// The local console, i.e. whatever logging existed before forwarding.
pub trait LocalConsole: Send + Sync {
    fn write(&self, level: ConsoleLevel, args: &[Value]);
}

/// Local console backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl LocalConsole for TracingConsole {
    fn write(&self, level: ConsoleLevel, args: &[Value]) {
        let line = render_line(args);
        match level {
            ConsoleLevel::Debug => tracing::debug!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
            ConsoleLevel::Info | ConsoleLevel::Log => {
                tracing::info!(target: SCRIPT_CONSOLE_TARGET, "{}", line)
            }
            ConsoleLevel::Warn => tracing::warn!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
            ConsoleLevel::Error => tracing::error!(target: SCRIPT_CONSOLE_TARGET, "{}", line),
        }
    }
}

thread_local! {
    static MIRRORING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as busy mirroring to the host.
///
/// `enter` returns `None` while another mirror attempt is active on this
/// thread, which breaks log → forward → log cycles.
pub(crate) struct MirrorGuard(());

impl MirrorGuard {
    pub(crate) fn enter() -> Option<Self> {
        MIRRORING.with(|flag| {
            if flag.get() {
                None
            } else {
                flag.set(true);
                Some(MirrorGuard(()))
            }
        })
    }
}

impl Drop for MirrorGuard {
    fn drop(&mut self) {
        MIRRORING.with(|flag| flag.set(false));
    }
}

/// Mirrors console output to the host.
pub struct ConsoleForwarder {
    bridge: Arc<BridgeContext>,
    local: Arc<dyn LocalConsole>,
}

impl ConsoleForwarder {
    /// Forwarder writing locally through `tracing`.
    pub fn new(bridge: Arc<BridgeContext>) -> Self {
        Self::with_local(bridge, Arc::new(TracingConsole))
    }

    pub fn with_local(bridge: Arc<BridgeContext>, local: Arc<dyn LocalConsole>) -> Self {
        Self { bridge, local }
    }

    /// Write locally, then mirror to the host if possible.
    pub fn emit(&self, level: ConsoleLevel, args: Vec<Value>) {
        self.local.write(level, &args);

        if !self.bridge.channel_available() {
            return;
        }
        if let Some(_guard) = MirrorGuard::enter() {
            self.bridge.notify(level.host_function(), args);
        }
    }

    pub fn debug(&self, args: Vec<Value>) {
        self.emit(ConsoleLevel::Debug, args);
    }

    pub fn info(&self, args: Vec<Value>) {
        self.emit(ConsoleLevel::Info, args);
    }

    pub fn log(&self, args: Vec<Value>) {
        self.emit(ConsoleLevel::Log, args);
    }

    pub fn warn(&self, args: Vec<Value>) {
        self.emit(ConsoleLevel::Warn, args);
    }

    pub fn error(&self, args: Vec<Value>) {
        self.emit(ConsoleLevel::Error, args);
    }
}
