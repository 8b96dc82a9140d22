//! The host end of the bridge channel.

use shared_wire::{HostReply, OutboundMessage, WireError};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::domain::HostConfig;
use crate::ports::ReplySink;
use crate::service::{FunctionRegistry, Job, WorkerPool};

/// Decodes incoming calls, routes them to host functions and answers every
/// call that expects a reply exactly once.
pub struct HostRuntime {
    registry: FunctionRegistry,
    pool: WorkerPool,
    sink: Arc<dyn ReplySink>,
}

impl HostRuntime {
    /// Start the worker pool on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(config: HostConfig, registry: FunctionRegistry, sink: Arc<dyn ReplySink>) -> Self {
        let pool = WorkerPool::start(config, Arc::clone(&sink));
        debug!(functions = ?registry.names(), "Host runtime started");
        Self {
            registry,
            pool,
            sink,
        }
    }

    /// Handle one serialized [`OutboundMessage`].
    ///
    /// Malformed input is logged and dropped. Calls to unknown functions and
    /// calls the pool refuses are rejected right away when a reply is
    /// expected.
    pub fn invoke(&self, raw: &str) {
        let message = match OutboundMessage::from_json(raw) {
            Ok(message) => message,
            Err(WireError::Empty) => {
                error!("Received empty invoke request");
                return;
            }
            Err(e) => {
                error!(error = %e, "Failed to decode invoke request");
                return;
            }
        };
        let OutboundMessage {
            func,
            args,
            promise_id,
        } = message;

        let Some(function) = self.registry.get(&func) else {
            error!(func = %func, "Host function not found");
            if let Some(id) = promise_id {
                self.reject(HostReply::rejected(id, format!("Function '{func}' not found")));
            }
            return;
        };

        if let Err(e) = self.pool.submit(Job::new(func, promise_id, args, function)) {
            error!(func = %e.func(), error = %e, "Failed to queue host function");
            if let Some(id) = promise_id {
                self.reject(HostReply::rejected(
                    id,
                    format!("Failed to queue task for '{}': {}", e.func(), e),
                ));
            }
        }
    }

    fn reject(&self, reply: HostReply) {
        let id = reply.promise_id;
        if let Err(e) = self.sink.deliver(reply) {
            error!(call_id = %id, error = %e, "Failed to deliver rejection");
        }
    }

    /// Feed every message from `rx` into [`invoke`](Self::invoke) until the
    /// sending side closes.
    pub fn serve(self: Arc<Self>, mut rx: mpsc::UnboundedReceiver<String>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(raw) = rx.recv().await {
                self.invoke(&raw);
            }
            debug!("Host channel closed");
        })
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Refuse new calls and finish the queued ones.
    pub async fn shutdown(&self) {
        self.pool.shutdown().await;
    }
}
