//! Prometheus metrics for the bridge.
//!
//! All metrics follow the naming convention: `wb_<side>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., calls_dispatched_total)
//! - **Gauge**: Value that can go up or down (e.g., pending_calls)
//! - **Histogram**: Distribution of values (e.g., job_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, Gauge, Histogram, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // SCRIPT SIDE
    // =========================================================================

    /// Calls handed to the dispatcher
    pub static ref BRIDGE_CALLS_DISPATCHED: IntCounterVec = IntCounterVec::new(
        Opts::new("wb_bridge_calls_dispatched_total", "Calls handed to the bridge dispatcher"),
        &["mode"]  // mode: call/notify
    ).expect("metric creation failed");

    /// Response-expecting calls by how they finished
    pub static ref BRIDGE_CALLS_SETTLED: IntCounterVec = IntCounterVec::new(
        Opts::new("wb_bridge_calls_settled_total", "Response-expecting calls by outcome"),
        &["outcome"]  // outcome: success/failure/timeout/send_failure/unavailable
    ).expect("metric creation failed");

    /// Completions or timeouts that found no pending call
    pub static ref BRIDGE_STALE_COMPLETIONS: IntCounter = IntCounter::new(
        "wb_bridge_stale_completions_total",
        "Completions for unknown, duplicate or already timed out call ids"
    ).expect("metric creation failed");

    /// Calls currently waiting for a reply
    pub static ref BRIDGE_PENDING_CALLS: Gauge = Gauge::new(
        "wb_bridge_pending_calls",
        "Calls currently waiting for a host reply"
    ).expect("metric creation failed");

    // =========================================================================
    // HOST SIDE
    // =========================================================================

    /// Host jobs by outcome
    pub static ref HOST_JOBS: IntCounterVec = IntCounterVec::new(
        Opts::new("wb_host_jobs_total", "Host function jobs by outcome"),
        &["outcome"]  // outcome: resolved/rejected/panicked/timed_out/notified
    ).expect("metric creation failed");

    /// Host job duration
    pub static ref HOST_JOB_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "wb_host_job_duration_seconds",
            "Time spent running host functions"
        ).buckets(exponential_buckets(0.0005, 2.0, 16).expect("valid buckets"))
    ).expect("metric creation failed");

    /// Calls refused by the worker pool
    pub static ref HOST_SUBMIT_REJECTIONS: IntCounter = IntCounter::new(
        "wb_host_submit_rejections_total",
        "Calls refused because the job queue was full or shutting down"
    ).expect("metric creation failed");
}

/// Handle to the metrics registry.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Metrics can be updated before registration; they are only exported once
/// registered.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Script side
        Box::new(BRIDGE_CALLS_DISPATCHED.clone()),
        Box::new(BRIDGE_CALLS_SETTLED.clone()),
        Box::new(BRIDGE_STALE_COMPLETIONS.clone()),
        Box::new(BRIDGE_PENDING_CALLS.clone()),
        // Host side
        Box::new(HOST_JOBS.clone()),
        Box::new(HOST_JOB_DURATION.clone()),
        Box::new(HOST_SUBMIT_REJECTIONS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
