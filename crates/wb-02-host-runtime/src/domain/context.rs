//! Per-call context handed to host functions.

use shared_wire::CallId;
use std::time::Duration;
use tokio::time::Instant;

/// What a host function knows about the call it is serving.
#[derive(Debug, Clone)]
pub struct CallContext {
    func: String,
    call_id: Option<CallId>,
    deadline: Instant,
}

impl CallContext {
    pub fn new(func: impl Into<String>, call_id: Option<CallId>, deadline: Instant) -> Self {
        Self {
            func: func.into(),
            call_id,
            deadline,
        }
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    /// Correlation id, absent for fire-and-forget calls.
    pub fn call_id(&self) -> Option<CallId> {
        self.call_id
    }

    /// Whether the caller waits for a reply.
    pub fn expects_reply(&self) -> bool {
        self.call_id.is_some()
    }

    /// Point after which the worker abandons the call.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
