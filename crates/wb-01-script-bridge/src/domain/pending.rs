//! Pending Call Registry - correlates outstanding calls with host replies.
//!
//! Maps call ids to calls still waiting for a reply. Three parties race to
//! finish a call: the success handler, the failure handler and the timeout.
//! Each of them goes through [`PendingCallRegistry::take_and_remove`]; only
//! the one that gets the record back may settle it.

use bridge_telemetry::{BRIDGE_CALLS_SETTLED, BRIDGE_PENDING_CALLS, BRIDGE_STALE_COMPLETIONS};
use dashmap::DashMap;
use prometheus::Gauge;
use serde_json::Value;
use shared_wire::CallId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::error::BridgeError;
use crate::ports::TimerHandle;

/// What a pending call resolves to.
pub type CallOutcome = Result<Value, BridgeError>;

/// One outstanding call awaiting a host reply.
///
/// Owns the only settlement handle for the caller's [`PendingReply`], so
/// settling consumes the record and can happen once. The timeout handle is
/// attached after the record is registered.
///
/// [`PendingReply`]: crate::service::PendingReply
#[derive(Debug)]
pub struct PendingCall {
    id: CallId,
    func: String,
    settler: oneshot::Sender<CallOutcome>,
    timeout_handle: Option<TimerHandle>,
    created_at: Instant,
}

impl PendingCall {
    pub fn new(id: CallId, func: impl Into<String>, settler: oneshot::Sender<CallOutcome>) -> Self {
        Self {
            id,
            func: func.into(),
            settler,
            timeout_handle: None,
            created_at: Instant::now(),
        }
    }

    pub fn id(&self) -> CallId {
        self.id
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    /// Timer to cancel when a reply wins; `None` if the reply arrived
    /// before the timer was attached.
    pub fn timeout_handle(&self) -> Option<TimerHandle> {
        self.timeout_handle
    }

    pub fn elapsed(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Deliver the outcome to the caller.
    ///
    /// Returns false if the caller already dropped its reply future.
    pub fn settle(self, outcome: CallOutcome) -> bool {
        let label = match &outcome {
            Ok(_) => "success",
            Err(error) => error.outcome_label(),
        };
        BRIDGE_CALLS_SETTLED.with_label_values(&[label]).inc();

        let delivered = self.settler.send(outcome).is_ok();
        if !delivered {
            debug!(
                call_id = %self.id,
                func = %self.func,
                "Caller dropped reply before settlement"
            );
        }
        delivered
    }
}

/// Statistics for the pending call registry
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Calls registered
    pub registered: AtomicU64,
    /// Calls resolved by the host
    pub completed: AtomicU64,
    /// Calls failed by the host or by the channel
    pub failed: AtomicU64,
    /// Calls that hit their timeout
    pub timed_out: AtomicU64,
    /// Completions or timeouts that found nothing to settle
    pub stale: AtomicU64,
}

impl PendingStats {
    pub fn registered(&self) -> u64 {
        self.registered.load(Ordering::Relaxed)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn timed_out(&self) -> u64 {
        self.timed_out.load(Ordering::Relaxed)
    }

    pub fn stale(&self) -> u64 {
        self.stale.load(Ordering::Relaxed)
    }
}

/// Registry of calls waiting for a reply.
#[derive(Debug)]
pub struct PendingCallRegistry {
    pending: DashMap<CallId, PendingCall>,
    stats: PendingStats,
    gauge: Gauge,
}

impl Default for PendingCallRegistry {
    fn default() -> Self {
        Self::with_gauge(BRIDGE_PENDING_CALLS.clone())
    }
}

impl PendingCallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_gauge(gauge: Gauge) -> Self {
        Self {
            pending: DashMap::new(),
            stats: PendingStats::default(),
            gauge,
        }
    }

    /// Register a pending call.
    ///
    /// The id must not already be registered; ids come from a
    /// [`CallIdAllocator`](super::CallIdAllocator) and are never reused.
    pub fn insert(&self, call: PendingCall) {
        let id = call.id();
        debug!(call_id = %id, func = %call.func(), "Registered pending call");

        let previous = self.pending.insert(id, call);
        debug_assert!(previous.is_none(), "call id {id} registered twice");

        self.stats.registered.fetch_add(1, Ordering::Relaxed);
        self.gauge.inc();
    }

    /// Attach the timeout timer to a registered call.
    ///
    /// Returns false if the call already left the registry (replied to or
    /// timed out while the timer was being scheduled); the caller should
    /// then cancel `handle`.
    pub fn attach_timeout(&self, id: CallId, handle: TimerHandle) -> bool {
        match self.pending.get_mut(&id) {
            Some(mut call) => {
                call.timeout_handle = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Remove and return the call for `id`, if still pending.
    ///
    /// The single point deciding which of reply/timeout wins.
    pub fn take_and_remove(&self, id: CallId) -> Option<PendingCall> {
        let (_, call) = self.pending.remove(&id)?;
        self.gauge.dec();
        Some(call)
    }

    /// Whether `id` is still waiting for a reply.
    pub fn has_pending(&self, id: CallId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }

    /// Timeout path: fail the call if it is still pending.
    ///
    /// Returns true if this call timed it out.
    pub fn expire(&self, id: CallId, timeout: Duration) -> bool {
        let Some(call) = self.take_and_remove(id) else {
            self.record_stale(id, "timeout");
            return false;
        };

        warn!(
            call_id = %id,
            func = %call.func(),
            timeout_ms = timeout.as_millis() as u64,
            "Call timed out waiting for host reply"
        );
        self.stats.timed_out.fetch_add(1, Ordering::Relaxed);

        let func = call.func().to_string();
        call.settle(Err(BridgeError::Timeout { func, timeout }));
        true
    }

    pub(crate) fn record_completed(&self) {
        self.stats.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed(&self) {
        self.stats.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A completion or timeout arrived for an id that is no longer pending:
    /// late reply after a timeout, duplicate reply, or an id never issued.
    pub(crate) fn record_stale(&self, id: CallId, source: &'static str) {
        self.stats.stale.fetch_add(1, Ordering::Relaxed);
        BRIDGE_STALE_COMPLETIONS.inc();
        warn!(
            call_id = %id,
            source = source,
            "No pending call for id (late, duplicate or unknown)"
        );
    }
}

impl Drop for PendingCallRegistry {
    fn drop(&mut self) {
        let abandoned = self.pending.len();
        if abandoned > 0 {
            debug!(abandoned = abandoned, "Dropping registry with pending calls");
            self.gauge.sub(abandoned as f64);
        }
    }
}
