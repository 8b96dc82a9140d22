//! Structured log helpers.
//!
//! Every bridge event about a specific call carries the same two fields so
//! log queries can follow one call across both processes:
//! - `call_id`: the correlation id (`promiseId` on the wire)
//! - `func`: the host function name

/// Log an event about a single call with standard fields.
///
/// ```rust,ignore
/// log_call_event!(warn, call_id, "window.setTitle", "Call timed out", timeout_ms = 30_000);
/// ```
#[macro_export]
macro_rules! log_call_event {
    ($level:ident, $call_id:expr, $func:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            call_id = %$call_id,
            func = %$func,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an event about a host job with standard fields.
#[macro_export]
macro_rules! log_job_event {
    ($level:ident, $func:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            func = %$func,
            $($($field)*,)?
            $msg
        )
    };
}
