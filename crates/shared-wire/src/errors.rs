//! Error-shaped values and wire errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors encoding or decoding wire messages.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("empty message")]
    Empty,

    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Error-shaped object delivered to a caller whose call the host failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostError {
    /// Error class name, `"Error"` unless the host said otherwise.
    #[serde(default = "default_error_name")]
    pub name: String,
    /// Human-readable message.
    pub message: String,
    /// Extra payload attached by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

fn default_error_name() -> String {
    "Error".to_string()
}

impl HostError {
    /// Plain error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: default_error_name(),
            message: message.into(),
            data: None,
        }
    }

    /// Override the error class name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach a payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for HostError {}

/// What the host reported when failing a call.
///
/// A typed [`HostError`] is already error-shaped and passes through
/// [`HostFailure::normalize`] unchanged. Anything else is wrapped: a string
/// becomes the message verbatim, every other value becomes its JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum HostFailure {
    Error(HostError),
    Value(Value),
}

impl HostFailure {
    /// Turn whatever the host sent into an error-shaped object.
    pub fn normalize(self) -> HostError {
        match self {
            HostFailure::Error(error) => error,
            HostFailure::Value(Value::String(message)) => HostError::new(message),
            HostFailure::Value(other) => HostError::new(other.to_string()),
        }
    }
}

impl From<HostError> for HostFailure {
    fn from(error: HostError) -> Self {
        HostFailure::Error(error)
    }
}

impl From<Value> for HostFailure {
    fn from(value: Value) -> Self {
        HostFailure::Value(value)
    }
}

impl From<&str> for HostFailure {
    fn from(message: &str) -> Self {
        HostFailure::Value(Value::String(message.to_string()))
    }
}

impl From<String> for HostFailure {
    fn from(message: String) -> Self {
        HostFailure::Value(Value::String(message))
    }
}
