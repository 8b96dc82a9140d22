//! Service layer: dispatcher, completion handlers and the thin consumers
//! built on top of them.

pub mod bridge;
pub mod forwarder;
pub mod reply;
pub mod runtime_api;

pub use bridge::BridgeContext;
pub use forwarder::{ConsoleForwarder, ConsoleLevel, LocalConsole, TracingConsole, SCRIPT_CONSOLE_TARGET};
pub use reply::PendingReply;
pub use runtime_api::WindowRuntime;
