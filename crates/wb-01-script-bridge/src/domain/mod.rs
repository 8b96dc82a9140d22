//! Domain layer: correlation state and configuration.

pub mod call_id;
pub mod config;
pub mod error;
pub mod pending;

pub use call_id::CallIdAllocator;
pub use config::BridgeConfig;
pub use error::{BridgeError, ChannelError, ConfigError};
pub use pending::{CallOutcome, PendingCall, PendingCallRegistry, PendingStats};
