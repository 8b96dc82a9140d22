//! Window-control convenience calls.
//!
//! Each call is fire-and-forget: the host applies it (or logs why it could
//! not) and sends nothing back.

use serde_json::json;
use shared_wire::functions;
use std::sync::Arc;

use crate::service::BridgeContext;

/// Window runtime exposed to script code.
#[derive(Clone)]
pub struct WindowRuntime {
    bridge: Arc<BridgeContext>,
}

impl WindowRuntime {
    pub fn new(bridge: Arc<BridgeContext>) -> Self {
        Self { bridge }
    }

    pub fn set_title(&self, title: &str) {
        self.bridge.notify(functions::WINDOW_SET_TITLE, vec![json!(title)]);
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.bridge
            .notify(functions::WINDOW_SET_SIZE, vec![json!(width), json!(height)]);
    }

    pub fn set_fullscreen(&self, fullscreen: bool) {
        self.bridge
            .notify(functions::WINDOW_SET_FULLSCREEN, vec![json!(fullscreen)]);
    }

    pub fn set_frameless(&self, frameless: bool) {
        self.bridge
            .notify(functions::WINDOW_SET_FRAMELESS, vec![json!(frameless)]);
    }

    pub fn begin_drag_at(&self, x: f64, y: f64) {
        self.bridge
            .notify(functions::WINDOW_BEGIN_DRAG_AT, vec![json!(x), json!(y)]);
    }

    pub fn minimize(&self) {
        self.bridge.notify(functions::WINDOW_MINIMIZE, vec![]);
    }

    pub fn maximize(&self) {
        self.bridge.notify(functions::WINDOW_MAXIMIZE, vec![]);
    }

    pub fn restore(&self) {
        self.bridge.notify(functions::WINDOW_RESTORE, vec![]);
    }

    pub fn close(&self) {
        self.bridge.notify(functions::WINDOW_CLOSE, vec![]);
    }
}
