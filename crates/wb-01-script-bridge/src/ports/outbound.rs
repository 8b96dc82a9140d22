//! Outbound Ports (Driven Ports)
//!
//! What the bridge needs from its environment: a way to hand a serialized
//! message to the host, and a way to run something once after a delay.

use std::fmt;
use std::time::Duration;

use crate::domain::ChannelError;

/// The single primitive reaching the host: "send serialized message".
///
/// Sending is synchronous. An implementation may fail, in which case the
/// bridge fails the call immediately (or logs and drops a notification).
pub trait HostChannel: Send + Sync {
    fn send(&self, message: &str) -> Result<(), ChannelError>;
}

/// Deferred work run by a [`TimerScheduler`].
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Opaque handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// Schedule-once / cancel capability.
///
/// Abstracted so tests can drive time explicitly.
pub trait TimerScheduler: Send + Sync {
    /// Run `task` once after `delay`.
    fn schedule_once(&self, delay: Duration, task: TimerTask) -> TimerHandle;

    /// Prevent a scheduled task from running. Cancelling a task that already
    /// ran, or was already cancelled, does nothing.
    fn cancel(&self, handle: TimerHandle);
}
