//! # Webview Bridge Test Suite
//!
//! Unified test crate wiring the script side and the host side together
//! in one process.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── loopback.rs       # BridgeContext ⇄ HostRuntime over in-process channels
//! └── integration/      # End-to-end flows
//!     ├── flows.rs      # call / reply / timeout / failure correlation
//!     └── forwarding.rs # console mirroring and window control
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wb-tests
//! cargo test -p wb-tests integration::flows
//!
//! # Benchmarks
//! cargo bench -p wb-tests
//! ```

pub mod integration;
pub mod loopback;

pub use loopback::Loopback;
