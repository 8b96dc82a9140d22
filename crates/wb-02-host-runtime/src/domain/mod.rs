//! Host runtime domain types.

pub mod config;
pub mod context;
pub mod error;

pub use config::HostConfig;
pub use context::CallContext;
pub use error::{ConfigError, HandlerError, SinkError, SubmitError};
