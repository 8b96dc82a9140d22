//! Service layer: function registry, worker pool and the invoke entry point.

pub mod registry;
pub mod runtime;
pub mod worker_pool;

pub use registry::{AsyncFnFunction, FnFunction, FunctionRegistry};
pub use runtime::HostRuntime;
pub use worker_pool::{Job, WorkerPool};
