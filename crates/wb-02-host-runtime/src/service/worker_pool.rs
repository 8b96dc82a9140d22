//! Bounded pool of worker tasks running host functions.
//!
//! Jobs wait in a bounded queue; `submit` never blocks and refuses work once
//! the queue is full or the pool is shutting down. Every job runs under the
//! configured deadline with panics captured, and produces at most one reply.

use bridge_telemetry::{log_call_event, log_job_event, time_histogram};
use bridge_telemetry::{HOST_JOBS, HOST_JOB_DURATION, HOST_SUBMIT_REJECTIONS};
use futures::FutureExt;
use parking_lot::Mutex;
use serde_json::Value;
use shared_wire::{CallId, HostReply};
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::domain::{CallContext, HostConfig, SubmitError};
use crate::ports::{HostFunction, ReplySink};

type SharedQueue = Arc<tokio::sync::Mutex<mpsc::Receiver<Job>>>;

/// One host function invocation waiting for a worker.
pub struct Job {
    func: String,
    call_id: Option<CallId>,
    args: Vec<Value>,
    function: Arc<dyn HostFunction>,
}

impl Job {
    pub fn new(
        func: impl Into<String>,
        call_id: Option<CallId>,
        args: Vec<Value>,
        function: Arc<dyn HostFunction>,
    ) -> Self {
        Self {
            func: func.into(),
            call_id,
            args,
            function,
        }
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    pub fn call_id(&self) -> Option<CallId> {
        self.call_id
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("func", &self.func)
            .field("call_id", &self.call_id)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Fixed set of tokio tasks draining a shared bounded queue.
pub struct WorkerPool {
    config: HostConfig,
    queue: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Spawn the workers on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(config: HostConfig, sink: Arc<dyn ReplySink>) -> Self {
        let config = config.sanitized();
        let (tx, rx) = mpsc::channel(config.queue_size);
        let rx: SharedQueue = Arc::new(tokio::sync::Mutex::new(rx));

        let workers = (0..config.worker_count)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    Arc::clone(&rx),
                    Arc::clone(&sink),
                    config.job_timeout,
                ))
            })
            .collect();

        info!(
            workers = config.worker_count,
            queue_size = config.queue_size,
            job_timeout_ms = config.job_timeout.as_millis() as u64,
            "Worker pool started"
        );

        Self {
            config,
            queue: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
        }
    }

    /// Queue a job without waiting.
    pub fn submit(&self, job: Job) -> Result<(), SubmitError> {
        let result = match self.queue.lock().as_ref() {
            Some(tx) => tx.try_send(job).map_err(|e| match e {
                TrySendError::Full(job) => SubmitError::QueueFull {
                    capacity: self.config.queue_size,
                    func: job.func,
                },
                TrySendError::Closed(job) => SubmitError::ShuttingDown { func: job.func },
            }),
            None => Err(SubmitError::ShuttingDown { func: job.func }),
        };
        if result.is_err() {
            HOST_SUBMIT_REJECTIONS.inc();
        }
        result
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Jobs waiting for a worker.
    pub fn queued(&self) -> usize {
        self.queue
            .lock()
            .as_ref()
            .map_or(0, |tx| tx.max_capacity() - tx.capacity())
    }

    pub fn is_running(&self) -> bool {
        self.queue.lock().is_some()
    }

    /// Stop intake, let the workers drain the queue, then wait for them.
    pub async fn shutdown(&self) {
        let Some(sender) = self.queue.lock().take() else {
            return;
        };
        drop(sender);

        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            if let Err(e) = handle.await {
                error!(error = %e, "Worker task failed");
            }
        }
        info!("Worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        for handle in self.workers.get_mut().drain(..) {
            handle.abort();
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    queue: SharedQueue,
    sink: Arc<dyn ReplySink>,
    job_timeout: Duration,
) {
    debug!(worker_id, "Worker started");
    loop {
        let next = queue.lock().await.recv().await;
        match next {
            Some(job) => run_job(job, sink.as_ref(), job_timeout).await,
            None => break,
        }
    }
    debug!(worker_id, "Worker stopped");
}

/// Run one job and deliver its reply, if the caller expects one.
async fn run_job(job: Job, sink: &dyn ReplySink, job_timeout: Duration) {
    let Job {
        func,
        call_id,
        args,
        function,
    } = job;
    let ctx = CallContext::new(func.clone(), call_id, Instant::now() + job_timeout);

    let outcome = {
        let _timer = time_histogram!(HOST_JOB_DURATION);
        let run = AssertUnwindSafe(function.call(&ctx, args)).catch_unwind();
        match tokio::time::timeout(job_timeout, run).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(err))) => Err(("rejected", err.to_string())),
            Ok(Err(panic)) => Err((
                "panicked",
                format!(
                    "Panic occurred while processing function '{func}': {}",
                    panic_text(panic.as_ref())
                ),
            )),
            Err(_) => Err((
                "timed_out",
                format!(
                    "Function '{func}' timed out after {}",
                    humantime::format_duration(job_timeout)
                ),
            )),
        }
    };

    let Some(id) = call_id else {
        match outcome {
            Ok(_) => HOST_JOBS.with_label_values(&["notified"]).inc(),
            Err((label, message)) => {
                HOST_JOBS.with_label_values(&[label]).inc();
                log_job_event!(warn, func, "Fire-and-forget host function failed", error = %message);
            }
        }
        return;
    };

    let reply = match outcome {
        Ok(value) => {
            HOST_JOBS.with_label_values(&["resolved"]).inc();
            log_call_event!(debug, id, func, "Host function resolved");
            HostReply::resolved(id, value)
        }
        Err((label, message)) => {
            HOST_JOBS.with_label_values(&[label]).inc();
            log_call_event!(warn, id, func, "Host function failed", error = %message);
            HostReply::rejected(id, message)
        }
    };

    if let Err(e) = sink.deliver(reply) {
        log_call_event!(error, id, func, "Failed to deliver reply", error = %e);
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
