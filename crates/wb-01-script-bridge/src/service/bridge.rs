//! Bridge context: the call dispatcher and the host's completion handlers.
//!
//! One `BridgeContext` owns the id allocator and the pending call registry
//! for one embedded surface. Nothing is global, so tests can build as many
//! independent bridges as they like.

use bridge_telemetry::{BRIDGE_CALLS_DISPATCHED, BRIDGE_CALLS_SETTLED};
use parking_lot::RwLock;
use serde_json::Value;
use shared_wire::{CallId, HostFailure, HostReply, OutboundMessage};
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use crate::domain::{
    BridgeConfig, BridgeError, CallIdAllocator, PendingCall, PendingCallRegistry, PendingStats,
};
use crate::ports::{CompletionApi, HostChannel, TimerScheduler};
use crate::service::PendingReply;

/// Correlation layer between script callers and the host.
pub struct BridgeContext {
    config: BridgeConfig,
    allocator: CallIdAllocator,
    registry: Arc<PendingCallRegistry>,
    channel: RwLock<Option<Arc<dyn HostChannel>>>,
    scheduler: Arc<dyn TimerScheduler>,
}

impl BridgeContext {
    /// Create a bridge with no channel attached.
    pub fn new(config: BridgeConfig, scheduler: Arc<dyn TimerScheduler>) -> Self {
        Self {
            config,
            allocator: CallIdAllocator::new(),
            registry: Arc::new(PendingCallRegistry::new()),
            channel: RwLock::new(None),
            scheduler,
        }
    }

    /// Attach the channel at construction time.
    pub fn with_channel(self, channel: Arc<dyn HostChannel>) -> Self {
        self.attach_channel(channel);
        self
    }

    /// Attach (or replace) the host channel.
    pub fn attach_channel(&self, channel: Arc<dyn HostChannel>) {
        *self.channel.write() = Some(channel);
    }

    /// Detach the host channel. Later calls fail fast; pending calls keep
    /// waiting for their reply or timeout.
    pub fn detach_channel(&self) {
        *self.channel.write() = None;
    }

    /// Capability check for the channel primitive.
    pub fn channel_available(&self) -> bool {
        self.channel.read().is_some()
    }

    fn channel(&self) -> Option<Arc<dyn HostChannel>> {
        self.channel.read().clone()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Dispatch `func(args)` to the host.
    ///
    /// With `expect_response` the returned [`PendingReply`] resolves to the
    /// host's reply; without it the call is fire-and-forget and `None` is
    /// returned.
    pub fn dispatch(
        &self,
        func: &str,
        args: Vec<Value>,
        expect_response: bool,
    ) -> Option<PendingReply> {
        if expect_response {
            Some(self.call(func, args))
        } else {
            self.notify(func, args);
            None
        }
    }

    /// Call `func(args)` and wait for the host's reply.
    ///
    /// A missing channel or a send failure is reported through the returned
    /// reply, which is then already failed.
    pub fn call(&self, func: &str, args: Vec<Value>) -> PendingReply {
        BRIDGE_CALLS_DISPATCHED.with_label_values(&["call"]).inc();

        let Some(channel) = self.channel() else {
            error!(
                func = func,
                "Host channel is not available, cannot call host function"
            );
            BRIDGE_CALLS_SETTLED
                .with_label_values(&["unavailable"])
                .inc();
            return PendingReply::failed(
                func,
                BridgeError::ChannelUnavailable {
                    func: func.to_string(),
                },
            );
        };

        let id = self.allocator.next();
        let (tx, rx) = oneshot::channel();

        // Registered before the timer exists, so an early firing always
        // finds the record.
        self.registry.insert(PendingCall::new(id, func, tx));

        let timeout = self.config.call_timeout;
        let registry = Arc::downgrade(&self.registry);
        let timeout_handle = self.scheduler.schedule_once(
            timeout,
            Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.expire(id, timeout);
                }
            }),
        );
        if !self.registry.attach_timeout(id, timeout_handle) {
            self.scheduler.cancel(timeout_handle);
        }

        let message = OutboundMessage::request(func, args, id);
        if let Err(send_error) = self.send(channel.as_ref(), &message) {
            self.scheduler.cancel(timeout_handle);
            // The channel may have delivered a reply synchronously before
            // raising; whoever took the record first settles it.
            if let Some(call) = self.registry.take_and_remove(id) {
                error!(
                    call_id = %id,
                    func = func,
                    error = %send_error,
                    "Failed to send call to host"
                );
                self.registry.record_failed();
                call.settle(Err(send_error));
            }
        } else {
            debug!(call_id = %id, func = func, "Sent call to host");
        }

        PendingReply::waiting(id, func, rx)
    }

    /// Fire-and-forget `func(args)`.
    ///
    /// Never reports anything to the caller: a missing channel is a silent
    /// no-op and send failures are logged and swallowed.
    pub fn notify(&self, func: &str, args: Vec<Value>) {
        BRIDGE_CALLS_DISPATCHED.with_label_values(&["notify"]).inc();

        let Some(channel) = self.channel() else {
            debug!(func = func, "Host channel is not available, dropping notification");
            return;
        };

        let message = OutboundMessage::notification(func, args);
        if let Err(e) = self.send(channel.as_ref(), &message) {
            error!(func = func, error = %e, "Failed to send notification to host");
        }
    }

    fn send(&self, channel: &dyn HostChannel, message: &OutboundMessage) -> Result<(), BridgeError> {
        let json = message.to_json()?;
        channel
            .send(&json)
            .map_err(|source| BridgeError::SendFailure {
                func: message.func.clone(),
                source,
            })
    }

    /// Host entry point: resolve call `id` with `value`.
    pub fn complete_success(&self, id: CallId, value: Value) -> bool {
        let Some(call) = self.registry.take_and_remove(id) else {
            self.registry.record_stale(id, "success");
            return false;
        };

        if let Some(handle) = call.timeout_handle() {
            self.scheduler.cancel(handle);
        }
        debug!(
            call_id = %id,
            func = %call.func(),
            response_time_ms = call.elapsed().as_millis() as u64,
            "Resolved pending call"
        );
        self.registry.record_completed();
        call.settle(Ok(value));
        true
    }

    /// Host entry point: fail call `id`.
    ///
    /// Strings become the error message, other values their JSON text; a
    /// typed [`HostError`](shared_wire::HostError) passes through unchanged.
    pub fn complete_failure(&self, id: CallId, error: impl Into<HostFailure>) -> bool {
        let Some(call) = self.registry.take_and_remove(id) else {
            self.registry.record_stale(id, "failure");
            return false;
        };

        if let Some(handle) = call.timeout_handle() {
            self.scheduler.cancel(handle);
        }
        let error = error.into().normalize();
        debug!(
            call_id = %id,
            func = %call.func(),
            error = %error,
            "Rejected pending call"
        );
        self.registry.record_failed();
        call.settle(Err(BridgeError::HostReported(error)));
        true
    }

    /// Route a reply envelope to the matching completion handler.
    pub fn handle_reply(&self, reply: HostReply) -> bool {
        CompletionApi::deliver_reply(self, reply)
    }

    /// Parse and route reply text from the host. Malformed text is logged
    /// and ignored.
    pub fn handle_reply_json(&self, raw: &str) -> bool {
        match HostReply::from_json(raw) {
            Ok(reply) => self.handle_reply(reply),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed reply from host");
                false
            }
        }
    }

    /// Whether call `id` is still waiting. Diagnostics only.
    pub fn has_pending(&self, id: CallId) -> bool {
        self.registry.has_pending(id)
    }

    pub fn pending_count(&self) -> usize {
        self.registry.pending_count()
    }

    pub fn stats(&self) -> &PendingStats {
        self.registry.stats()
    }
}

impl CompletionApi for BridgeContext {
    fn complete_success(&self, id: CallId, value: Value) -> bool {
        BridgeContext::complete_success(self, id, value)
    }

    fn complete_failure(&self, id: CallId, error: HostFailure) -> bool {
        BridgeContext::complete_failure(self, id, error)
    }
}
