//! Ports: traits at the edges of the bridge.

pub mod inbound;
pub mod outbound;

pub use inbound::CompletionApi;
pub use outbound::{HostChannel, TimerHandle, TimerScheduler, TimerTask};
