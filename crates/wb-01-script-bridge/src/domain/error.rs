//! Error types for the script bridge.

use shared_wire::{HostError, WireError};
use std::time::Duration;
use thiserror::Error;

/// Failure delivered to a caller through its [`PendingReply`].
///
/// [`PendingReply`]: crate::service::PendingReply
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No host channel is attached.
    #[error("host channel is not available, cannot call '{func}'")]
    ChannelUnavailable { func: String },

    /// The channel raised while sending.
    #[error("failed to send '{func}' to host: {source}")]
    SendFailure {
        func: String,
        #[source]
        source: ChannelError,
    },

    /// No reply within the call timeout.
    #[error("Timeout waiting for response from {func} ({})", format_timeout(.timeout))]
    Timeout { func: String, timeout: Duration },

    /// The host failed the call; the payload is already normalized.
    #[error("host reported error: {0}")]
    HostReported(HostError),

    /// The outbound message could not be serialized.
    #[error("failed to encode call: {0}")]
    Encode(#[from] WireError),

    /// The bridge was dropped while the call was still pending.
    #[error("bridge dropped while '{func}' was pending")]
    Abandoned { func: String },
}

impl BridgeError {
    /// The host's error object, if the host failed the call.
    pub fn host_error(&self) -> Option<&HostError> {
        match self {
            BridgeError::HostReported(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BridgeError::Timeout { .. })
    }

    /// Label used for the settlement metrics.
    pub(crate) fn outcome_label(&self) -> &'static str {
        match self {
            BridgeError::ChannelUnavailable { .. } => "unavailable",
            BridgeError::SendFailure { .. } | BridgeError::Encode(_) => "send_failure",
            BridgeError::Timeout { .. } => "timeout",
            BridgeError::HostReported(_) => "failure",
            BridgeError::Abandoned { .. } => "abandoned",
        }
    }
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// Error raised by a [`HostChannel`](crate::ports::HostChannel) send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,

    #[error("{0}")]
    Rejected(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}
