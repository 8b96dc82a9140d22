//! Reply delivery back to the script side.

use shared_wire::{HostReply, ReplyOutcome, WireError};
use tokio::sync::mpsc;

use crate::domain::SinkError;
use crate::ports::{ReplySink, ScriptEvaluator};

/// Global the script side exposes its completion handlers under.
pub const SCRIPT_BRIDGE_OBJECT: &str = "window.__hostBridge";

/// In-process sink: pushes replies into a tokio channel, e.g. straight to a
/// script bridge living in the same process.
#[derive(Debug, Clone)]
pub struct ChannelReplySink {
    tx: mpsc::UnboundedSender<HostReply>,
}

impl ChannelReplySink {
    pub fn new(tx: mpsc::UnboundedSender<HostReply>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<HostReply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ReplySink for ChannelReplySink {
    fn deliver(&self, reply: HostReply) -> Result<(), SinkError> {
        self.tx.send(reply).map_err(|_| SinkError::Closed)
    }
}

/// Sink for an embedded UI surface: renders each reply as a call to the
/// script side's completion handlers and evaluates it.
pub struct ScriptReplySink<E> {
    evaluator: E,
}

impl<E: ScriptEvaluator> ScriptReplySink<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: ScriptEvaluator> ReplySink for ScriptReplySink<E> {
    fn deliver(&self, reply: HostReply) -> Result<(), SinkError> {
        let script = render_completion_script(&reply)?;
        self.evaluator.evaluate(&script);
        Ok(())
    }
}

/// `window.__hostBridge.completeSuccess(<id>, <json>);` or the
/// `completeFailure` equivalent.
pub fn render_completion_script(reply: &HostReply) -> Result<String, SinkError> {
    let (handler, payload) = match &reply.outcome {
        ReplyOutcome::Resolved(value) => ("completeSuccess", value),
        ReplyOutcome::Rejected(error) => ("completeFailure", error),
    };
    let payload = serde_json::to_string(payload).map_err(WireError::Encode)?;
    Ok(format!(
        "{SCRIPT_BRIDGE_OBJECT}.{handler}({}, {payload});",
        reply.promise_id
    ))
}
