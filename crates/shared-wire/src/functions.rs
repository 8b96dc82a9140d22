//! Names of the host functions used by the built-in consumers.
//!
//! The bridge core never interprets these; they only have to agree between the
//! script-side wrappers and the host-side registry.

/// Console mirror targets, one per severity.
pub const CONSOLE_DEBUG: &str = "console.debug";
pub const CONSOLE_INFO: &str = "console.info";
pub const CONSOLE_LOG: &str = "console.log";
pub const CONSOLE_WARN: &str = "console.warn";
pub const CONSOLE_ERROR: &str = "console.error";

/// Window control.
pub const WINDOW_SET_TITLE: &str = "window.setTitle";
pub const WINDOW_SET_SIZE: &str = "window.setSize";
pub const WINDOW_SET_FULLSCREEN: &str = "window.setFullscreen";
pub const WINDOW_SET_FRAMELESS: &str = "window.setFrameless";
pub const WINDOW_BEGIN_DRAG_AT: &str = "window.beginDragAt";
pub const WINDOW_MINIMIZE: &str = "window.minimize";
pub const WINDOW_MAXIMIZE: &str = "window.maximize";
pub const WINDOW_RESTORE: &str = "window.restore";
pub const WINDOW_CLOSE: &str = "window.close";

/// All console mirror targets.
pub const CONSOLE_FUNCTIONS: [&str; 5] = [
    CONSOLE_DEBUG,
    CONSOLE_INFO,
    CONSOLE_LOG,
    CONSOLE_WARN,
    CONSOLE_ERROR,
];

/// All window control functions.
pub const WINDOW_FUNCTIONS: [&str; 9] = [
    WINDOW_SET_TITLE,
    WINDOW_SET_SIZE,
    WINDOW_SET_FULLSCREEN,
    WINDOW_SET_FRAMELESS,
    WINDOW_BEGIN_DRAG_AT,
    WINDOW_MINIMIZE,
    WINDOW_MAXIMIZE,
    WINDOW_RESTORE,
    WINDOW_CLOSE,
];
