//! Inbound Ports (Driving Ports)
//!
//! Entry points the host invokes to finish a call. Script code never calls
//! these itself.

use serde_json::Value;
use shared_wire::{CallId, HostFailure, HostReply, ReplyOutcome};

/// Completion entry points exposed to the host.
///
/// Both are safe to call with unknown or stale ids: they log and return
/// false.
pub trait CompletionApi: Send + Sync {
    /// Resolve call `id` with `value`. Returns true if a pending call was
    /// settled.
    fn complete_success(&self, id: CallId, value: Value) -> bool;

    /// Fail call `id`. The failure is normalized into an error-shaped object
    /// before it reaches the caller. Returns true if a pending call was
    /// settled.
    fn complete_failure(&self, id: CallId, error: HostFailure) -> bool;

    /// Route a decoded reply envelope to the matching entry point.
    fn deliver_reply(&self, reply: HostReply) -> bool {
        match reply.outcome {
            ReplyOutcome::Resolved(value) => self.complete_success(reply.promise_id, value),
            ReplyOutcome::Rejected(error) => {
                self.complete_failure(reply.promise_id, HostFailure::Value(error))
            }
        }
    }
}
