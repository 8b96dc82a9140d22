//! Adapters: concrete implementations of the outbound ports.

pub mod channel;
pub mod manual_timer;
pub mod tokio_timer;
pub mod tracing_layer;

pub use channel::{FnChannel, MpscChannel, RecordingChannel};
pub use manual_timer::ManualTimerScheduler;
pub use tokio_timer::TokioTimerScheduler;
pub use tracing_layer::HostForwardingLayer;
