//! Ports of the host runtime.
//!
//! - [`inbound`]: what the runtime drives (host functions)
//! - [`outbound`]: what the runtime depends on (reply delivery, script
//!   evaluation, native window control)

pub mod inbound;
pub mod outbound;

pub use inbound::HostFunction;
pub use outbound::{ReplySink, ScriptEvaluator, WindowControl};
