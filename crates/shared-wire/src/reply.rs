//! Reply envelope: host → script side.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CallId, WireError};

/// How the host finished a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplyOutcome {
    /// The host function returned a value.
    #[serde(rename = "result")]
    Resolved(Value),
    /// The host function failed. The value is normalized on the script side.
    #[serde(rename = "error")]
    Rejected(Value),
}

/// Reply to a call that carried a `promiseId`.
///
/// Wire shape: `{"promiseId": 1, "result": 42}` or
/// `{"promiseId": 1, "error": "boom"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReply {
    #[serde(rename = "promiseId")]
    pub promise_id: CallId,
    #[serde(flatten)]
    pub outcome: ReplyOutcome,
}

impl HostReply {
    /// Successful reply.
    pub fn resolved(promise_id: CallId, value: Value) -> Self {
        Self {
            promise_id,
            outcome: ReplyOutcome::Resolved(value),
        }
    }

    /// Failed reply.
    pub fn rejected(promise_id: CallId, error: impl Into<Value>) -> Self {
        Self {
            promise_id,
            outcome: ReplyOutcome::Rejected(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ReplyOutcome::Resolved(_))
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Encode)
    }

    pub fn from_json(raw: &str) -> Result<Self, WireError> {
        if raw.trim().is_empty() {
            return Err(WireError::Empty);
        }
        serde_json::from_str(raw).map_err(WireError::Decode)
    }
}
