//! End-to-end flows across both sides of the bridge.

pub mod flows;
pub mod forwarding;
