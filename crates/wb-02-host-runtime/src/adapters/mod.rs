//! Adapters for the host runtime's outbound ports.

pub mod reply_sink;
pub mod window;

pub use reply_sink::{render_completion_script, ChannelReplySink, ScriptReplySink, SCRIPT_BRIDGE_OBJECT};
pub use window::{RecordingWindow, WindowCommand};
