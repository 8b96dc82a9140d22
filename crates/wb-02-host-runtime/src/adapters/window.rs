//! Window control that records commands instead of touching a native window.

use parking_lot::Mutex;

use crate::ports::WindowControl;

/// A window operation as requested by the script side.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    SetTitle(String),
    SetSize { width: u32, height: u32 },
    SetFullscreen(bool),
    SetFrameless(bool),
    BeginDragAt { x: f64, y: f64 },
    Minimize,
    Maximize,
    Restore,
    Close,
}

/// Headless [`WindowControl`] keeping every command in order.
#[derive(Debug, Default)]
pub struct RecordingWindow {
    commands: Mutex<Vec<WindowCommand>>,
}

impl RecordingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<WindowCommand> {
        self.commands.lock().clone()
    }

    fn push(&self, command: WindowCommand) {
        self.commands.lock().push(command);
    }
}

impl WindowControl for RecordingWindow {
    fn set_title(&self, title: &str) {
        self.push(WindowCommand::SetTitle(title.to_string()));
    }

    fn set_size(&self, width: u32, height: u32) {
        self.push(WindowCommand::SetSize { width, height });
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        self.push(WindowCommand::SetFullscreen(fullscreen));
    }

    fn set_frameless(&self, frameless: bool) {
        self.push(WindowCommand::SetFrameless(frameless));
    }

    fn begin_drag_at(&self, x: f64, y: f64) {
        self.push(WindowCommand::BeginDragAt { x, y });
    }

    fn minimize(&self) {
        self.push(WindowCommand::Minimize);
    }

    fn maximize(&self) {
        self.push(WindowCommand::Maximize);
    }

    fn restore(&self) {
        self.push(WindowCommand::Restore);
    }

    fn close(&self) {
        self.push(WindowCommand::Close);
    }
}
