//! Host channel implementations.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::ChannelError;
use crate::ports::HostChannel;

/// Channel backed by a closure, e.g. a webview's native `postMessage`
/// binding.
pub struct FnChannel<F> {
    send: F,
}

impl<F> FnChannel<F>
where
    F: Fn(&str) -> Result<(), ChannelError> + Send + Sync,
{
    pub fn new(send: F) -> Self {
        Self { send }
    }
}

impl<F> HostChannel for FnChannel<F>
where
    F: Fn(&str) -> Result<(), ChannelError> + Send + Sync,
{
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        (self.send)(message)
    }
}

/// In-process channel: forwards every message into a tokio unbounded
/// channel read by the host runtime.
#[derive(Debug, Clone)]
pub struct MpscChannel {
    tx: mpsc::UnboundedSender<String>,
}

impl MpscChannel {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }

    /// Channel plus the receiving end for the host.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl HostChannel for MpscChannel {
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        self.tx
            .send(message.to_string())
            .map_err(|_| ChannelError::Closed)
    }
}

/// Channel that records what it is asked to send.
///
/// Can be switched into a failing mode to exercise send-failure paths.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<String>>,
    failure: Mutex<Option<ChannelError>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following send fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock() = Some(ChannelError::Rejected(reason.into()));
    }

    /// Make sends succeed again.
    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    /// Messages successfully sent so far.
    pub fn messages(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn take_messages(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl HostChannel for RecordingChannel {
    fn send(&self, message: &str) -> Result<(), ChannelError> {
        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }
        self.sent.lock().push(message.to_string());
        Ok(())
    }
}
