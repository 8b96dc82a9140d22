//! # Webview Bridge Host Runtime
//!
//! The host end of the bridge channel. Serialized [`OutboundMessage`]s from
//! the script side arrive through [`HostRuntime::invoke`], are routed by
//! function name through a [`FunctionRegistry`] and executed on a bounded
//! [`WorkerPool`]. Calls that carry a `promiseId` get exactly one
//! [`HostReply`] back through a [`ReplySink`].
//!
//! ## Flow
//!
//! ```text
//! script ──invoke(json)──→ HostRuntime ──submit──→ WorkerPool
//!                              │                       │
//!                      unknown func /             run handler under
//!                      queue full                 timeout + panic capture
//!                              │                       │
//!                              └──────→ ReplySink ←────┘
//!                                          │
//!                     completeSuccess / completeFailure on the script side
//! ```
//!
//! ## Built-in functions
//!
//! [`builtins::register_console`] installs `console.*`, which writes script
//! console lines into the host log. [`builtins::register_window`] installs
//! `window.*` against a [`WindowControl`] implementation.

#![deny(unsafe_code)]

pub mod adapters;
pub mod builtins;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{ChannelReplySink, RecordingWindow, ScriptReplySink, WindowCommand};
pub use domain::{CallContext, ConfigError, HandlerError, HostConfig, SinkError, SubmitError};
pub use ports::{HostFunction, ReplySink, ScriptEvaluator, WindowControl};
pub use service::{FunctionRegistry, HostRuntime, Job, WorkerPool};

pub use shared_wire::{CallId, HostReply, OutboundMessage};
