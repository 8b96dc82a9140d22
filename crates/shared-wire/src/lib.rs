//! # Shared Wire Crate
//!
//! Wire-level types for the webview host bridge.
//!
//! ```text
//!  script side                                   host side
//! ┌─────────────────┐  OutboundMessage (JSON)  ┌─────────────────┐
//! │  BridgeContext  │ ───────────────────────► │   HostRuntime   │
//! │                 │ ◄─────────────────────── │                 │
//! └─────────────────┘     HostReply (JSON)     └─────────────────┘
//! ```
//!
//! - [`OutboundMessage`]: `{ func, args, promiseId? }`, `promiseId` present iff a
//!   reply is expected.
//! - [`HostReply`]: `{ promiseId, result }` or `{ promiseId, error }`.
//! - [`HostFailure`] / [`HostError`]: what the host reports and the error-shaped
//!   object the caller finally receives.

pub mod call_id;
pub mod console;
pub mod errors;
pub mod functions;
pub mod message;
pub mod reply;

pub use call_id::CallId;
pub use errors::{HostError, HostFailure, WireError};
pub use message::OutboundMessage;
pub use reply::{HostReply, ReplyOutcome};
