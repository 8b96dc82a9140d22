//! Outbound ports (driven by the runtime).

use shared_wire::HostReply;

use crate::domain::SinkError;

/// Delivers replies back to the script side.
pub trait ReplySink: Send + Sync {
    fn deliver(&self, reply: HostReply) -> Result<(), SinkError>;
}

/// Evaluates script text inside the embedded UI surface.
pub trait ScriptEvaluator: Send + Sync {
    fn evaluate(&self, script: &str);
}

/// Native window operations of the embedding application.
///
/// Implementations marshal onto the UI thread as needed; calls return once
/// the request is queued.
pub trait WindowControl: Send + Sync {
    fn set_title(&self, title: &str);
    fn set_size(&self, width: u32, height: u32);
    fn set_fullscreen(&self, fullscreen: bool);
    fn set_frameless(&self, frameless: bool);
    fn begin_drag_at(&self, x: f64, y: f64);
    fn minimize(&self);
    fn maximize(&self);
    fn restore(&self);
    fn close(&self);
}
