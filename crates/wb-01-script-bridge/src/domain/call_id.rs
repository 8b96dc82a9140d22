//! Call identifier allocation.

use shared_wire::CallId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out call ids 1, 2, 3, … for the lifetime of one bridge.
///
/// Ids are never reused. Exhausting `u64` is not a concern for a single
/// process.
#[derive(Debug, Default)]
pub struct CallIdAllocator {
    last: AtomicU64,
}

impl CallIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id.
    pub fn next(&self) -> CallId {
        CallId::new(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Last id handed out, `None` before the first call.
    pub fn last(&self) -> Option<CallId> {
        match self.last.load(Ordering::Relaxed) {
            0 => None,
            raw => Some(CallId::new(raw)),
        }
    }
}
