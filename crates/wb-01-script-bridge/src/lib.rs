//! # WB-01 Script Bridge
//!
//! Lets code running inside an embedded UI surface call named host functions
//! over a one-way, string-only channel and receive correlated replies.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): correlation state, no I/O
//!   - `CallIdAllocator`: strictly increasing call ids starting at 1
//!   - `PendingCallRegistry`: id → pending call, atomic take-and-remove
//!   - `BridgeConfig`: call timeout (30 s by default)
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `HostChannel`: driven port, "send serialized message to host"
//!   - `TimerScheduler`: driven port, schedule once / cancel
//!   - `CompletionApi`: driving port, the host's completion entry points
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `BridgeContext`: dispatcher + completion handlers
//!   - `ConsoleForwarder`: mirrors console output to the host
//!   - `WindowRuntime`: window-control convenience calls
//!
//! - **Adapters Layer** (`adapters/`): tokio and simulated timers, channel
//!   implementations, a `tracing` layer that mirrors application logs
//!
//! ## Call lifecycle
//!
//! ```text
//! call("op", args) ──► allocate id ──► schedule timeout ──► register ──► send
//!                                                                          │
//!         ┌──────────────────── take_and_remove(id) ◄──────────────────────┤
//!         │                 (first of: reply ok / reply err / timeout)     │
//!         ▼                                                                │
//!   settle PendingReply exactly once        everyone else: warn + no-op ◄──┘
//! ```
//!
//! ## Invariants
//!
//! - A pending call is in the registry iff it has not been settled and its
//!   timeout has not fired.
//! - Each pending call is settled exactly once: the settlement handle is moved
//!   out of the registry and consumed by `settle`.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use wb_01_script_bridge::{BridgeConfig, BridgeContext, FnChannel, TokioTimerScheduler};
//!
//! let scheduler = Arc::new(TokioTimerScheduler::current()?);
//! let bridge = BridgeContext::new(BridgeConfig::default(), scheduler)
//!     .with_channel(Arc::new(FnChannel::new(|json: &str| post_to_host(json))));
//!
//! let title = bridge.call("window.getTitle", vec![]).await?;
//! bridge.notify("console.log", vec!["ready".into()]);
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{
    FnChannel, HostForwardingLayer, ManualTimerScheduler, MpscChannel, RecordingChannel,
    TokioTimerScheduler,
};
pub use domain::{
    BridgeConfig, BridgeError, CallIdAllocator, ChannelError, ConfigError, PendingCall,
    PendingCallRegistry, PendingStats,
};
pub use ports::{CompletionApi, HostChannel, TimerHandle, TimerScheduler, TimerTask};
pub use service::{
    BridgeContext, ConsoleForwarder, ConsoleLevel, LocalConsole, PendingReply, TracingConsole,
    WindowRuntime, SCRIPT_CONSOLE_TARGET,
};

pub use shared_wire::{CallId, HostError, HostFailure, HostReply, OutboundMessage};
