//! Inbound port: host functions callable from the script side.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{CallContext, HandlerError};

/// A function the script side can call by name.
///
/// The returned value becomes the `result` of the reply; an error becomes its
/// `error` text. Handlers run on the worker pool and must not block the
/// executor for long stretches.
#[async_trait]
pub trait HostFunction: Send + Sync {
    async fn call(&self, ctx: &CallContext, args: Vec<Value>) -> Result<Value, HandlerError>;
}
