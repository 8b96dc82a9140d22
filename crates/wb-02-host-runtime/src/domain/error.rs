//! Host runtime error types.

use shared_wire::WireError;
use thiserror::Error;

/// Failure raised by a host function.
///
/// The `Display` text is what a rejected reply carries back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("missing {0} argument")]
    MissingArgument(&'static str),

    #[error("invalid {0} argument")]
    InvalidArgument(&'static str),

    #[error("{0}")]
    OutOfRange(String),

    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// The worker pool refused a job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("worker pool job queue is full (capacity: {capacity}), cannot submit job for {func}")]
    QueueFull { capacity: usize, func: String },

    #[error("worker pool is shutting down, cannot submit job for {func}")]
    ShuttingDown { func: String },
}

impl SubmitError {
    /// Function the refused job was for.
    pub fn func(&self) -> &str {
        match self {
            Self::QueueFull { func, .. } | Self::ShuttingDown { func } => func,
        }
    }
}

/// A reply could not be handed back to the script side.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("reply receiver is closed")]
    Closed,

    #[error("reply encoding failed: {0}")]
    Encode(#[from] WireError),
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid job timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}
