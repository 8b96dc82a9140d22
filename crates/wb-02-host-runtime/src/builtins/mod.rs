//! Host functions every runtime ships with.

pub mod console;
pub mod window;

pub use console::{register_console, ConsoleFunction, SCRIPT_CONSOLE_TARGET};
pub use window::{register_window, WindowFunction, WindowOp};
