//! Call identifier carried on the wire as `promiseId`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier correlating an outbound call with its reply.
///
/// Allocated by the script side starting at 1, never reused for the lifetime of
/// a bridge. The value 0 is never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(u64);

impl CallId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CallId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<CallId> for u64 {
    fn from(id: CallId) -> Self {
        id.0
    }
}
