//! Outbound message: script side → host.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{CallId, WireError};

/// A call to a named host function.
///
/// Wire shape: `{"func": "...", "args": [...], "promiseId": 1}` where
/// `promiseId` is present if and only if the caller expects a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Host function name. Opaque to the bridge.
    pub func: String,
    /// Positional arguments.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Correlation id of the pending call, if a reply is expected.
    #[serde(
        rename = "promiseId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_promise_id"
    )]
    pub promise_id: Option<CallId>,
}

impl OutboundMessage {
    /// Message for a fire-and-forget call.
    pub fn notification(func: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            func: func.into(),
            args,
            promise_id: None,
        }
    }

    /// Message for a call whose reply is correlated by `id`.
    pub fn request(func: impl Into<String>, args: Vec<Value>, id: CallId) -> Self {
        Self {
            func: func.into(),
            args,
            promise_id: Some(id),
        }
    }

    /// Whether the sender is waiting for a reply.
    pub fn expects_reply(&self) -> bool {
        self.promise_id.is_some()
    }

    /// Serialize to the JSON text handed to the channel.
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Encode)
    }

    /// Parse the JSON text received by the host.
    pub fn from_json(raw: &str) -> Result<Self, WireError> {
        if raw.trim().is_empty() {
            return Err(WireError::Empty);
        }
        serde_json::from_str(raw).map_err(WireError::Decode)
    }
}

/// Identifiers start at 1, so an explicit 0 means "no reply expected".
fn deserialize_promise_id<'de, D>(deserializer: D) -> Result<Option<CallId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(raw.filter(|id| *id != 0).map(CallId::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_omits_promise_id() {
        let msg = OutboundMessage::notification("fireOnly", vec![]);
        let json = msg.to_json().unwrap();
        assert_eq!(json, r#"{"func":"fireOnly","args":[]}"#);
        assert!(!msg.expects_reply());
    }

    #[test]
    fn test_request_carries_promise_id() {
        let msg = OutboundMessage::request("op", vec![json!(1), json!(2)], CallId::new(1));
        let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value, json!({"func": "op", "args": [1, 2], "promiseId": 1}));
    }

    #[test]
    fn test_decode_without_args() {
        let msg = OutboundMessage::from_json(r#"{"func":"window.close"}"#).unwrap();
        assert_eq!(msg.func, "window.close");
        assert!(msg.args.is_empty());
        assert_eq!(msg.promise_id, None);
    }

    #[test]
    fn test_decode_zero_promise_id_is_absent() {
        let msg = OutboundMessage::from_json(r#"{"func":"op","args":[],"promiseId":0}"#).unwrap();
        assert!(!msg.expects_reply());
    }

    #[test]
    fn test_decode_null_promise_id_is_absent() {
        let msg =
            OutboundMessage::from_json(r#"{"func":"op","args":[],"promiseId":null}"#).unwrap();
        assert_eq!(msg.promise_id, None);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(matches!(OutboundMessage::from_json("  "), Err(WireError::Empty)));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            OutboundMessage::from_json("{not json"),
            Err(WireError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_missing_func() {
        assert!(OutboundMessage::from_json(r#"{"args":[]}"#).is_err());
    }
}
