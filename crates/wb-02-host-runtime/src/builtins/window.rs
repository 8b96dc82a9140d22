//! `window.*`: native window control requested by the script side.

use async_trait::async_trait;
use serde_json::Value;
use shared_wire::functions;
use std::sync::Arc;

use crate::domain::{CallContext, HandlerError};
use crate::ports::{HostFunction, WindowControl};
use crate::service::FunctionRegistry;

pub const MIN_WINDOW_EXTENT: f64 = 100.0;
pub const MAX_WINDOW_EXTENT: f64 = 10_000.0;

/// Window operation behind one host function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    SetTitle,
    SetSize,
    SetFullscreen,
    SetFrameless,
    BeginDragAt,
    Minimize,
    Maximize,
    Restore,
    Close,
}

impl WindowOp {
    pub const ALL: [WindowOp; 9] = [
        WindowOp::SetTitle,
        WindowOp::SetSize,
        WindowOp::SetFullscreen,
        WindowOp::SetFrameless,
        WindowOp::BeginDragAt,
        WindowOp::Minimize,
        WindowOp::Maximize,
        WindowOp::Restore,
        WindowOp::Close,
    ];

    pub fn function_name(self) -> &'static str {
        match self {
            WindowOp::SetTitle => functions::WINDOW_SET_TITLE,
            WindowOp::SetSize => functions::WINDOW_SET_SIZE,
            WindowOp::SetFullscreen => functions::WINDOW_SET_FULLSCREEN,
            WindowOp::SetFrameless => functions::WINDOW_SET_FRAMELESS,
            WindowOp::BeginDragAt => functions::WINDOW_BEGIN_DRAG_AT,
            WindowOp::Minimize => functions::WINDOW_MINIMIZE,
            WindowOp::Maximize => functions::WINDOW_MAXIMIZE,
            WindowOp::Restore => functions::WINDOW_RESTORE,
            WindowOp::Close => functions::WINDOW_CLOSE,
        }
    }

    /// Validate `args` and apply the operation.
    pub fn apply(self, window: &dyn WindowControl, args: &[Value]) -> Result<(), HandlerError> {
        match self {
            WindowOp::SetTitle => {
                let title = string_arg(args, 0, "title")?;
                if title.is_empty() {
                    return Err(HandlerError::OutOfRange("title cannot be empty".into()));
                }
                window.set_title(title);
            }
            WindowOp::SetSize => {
                let width = number_arg(args, 0, "width")?;
                let height = number_arg(args, 1, "height")?;
                if width < MIN_WINDOW_EXTENT || height < MIN_WINDOW_EXTENT {
                    return Err(HandlerError::OutOfRange(
                        "width and height must be at least 100".into(),
                    ));
                }
                if width > MAX_WINDOW_EXTENT || height > MAX_WINDOW_EXTENT {
                    return Err(HandlerError::OutOfRange(
                        "width and height must not exceed 10000".into(),
                    ));
                }
                window.set_size(width as u32, height as u32);
            }
            WindowOp::SetFullscreen => window.set_fullscreen(bool_arg(args, 0, "fullscreen")?),
            WindowOp::SetFrameless => window.set_frameless(bool_arg(args, 0, "frameless")?),
            WindowOp::BeginDragAt => {
                let x = number_arg(args, 0, "x")?;
                let y = number_arg(args, 1, "y")?;
                window.begin_drag_at(x, y);
            }
            WindowOp::Minimize => window.minimize(),
            WindowOp::Maximize => window.maximize(),
            WindowOp::Restore => window.restore(),
            WindowOp::Close => window.close(),
        }
        Ok(())
    }
}

fn arg<'a>(args: &'a [Value], index: usize, name: &'static str) -> Result<&'a Value, HandlerError> {
    args.get(index).ok_or(HandlerError::MissingArgument(name))
}

fn string_arg<'a>(args: &'a [Value], index: usize, name: &'static str) -> Result<&'a str, HandlerError> {
    arg(args, index, name)?
        .as_str()
        .ok_or(HandlerError::InvalidArgument(name))
}

fn number_arg(args: &[Value], index: usize, name: &'static str) -> Result<f64, HandlerError> {
    arg(args, index, name)?
        .as_f64()
        .ok_or(HandlerError::InvalidArgument(name))
}

fn bool_arg(args: &[Value], index: usize, name: &'static str) -> Result<bool, HandlerError> {
    arg(args, index, name)?
        .as_bool()
        .ok_or(HandlerError::InvalidArgument(name))
}

/// Host function applying one [`WindowOp`] to a shared window.
pub struct WindowFunction {
    op: WindowOp,
    window: Arc<dyn WindowControl>,
}

impl WindowFunction {
    pub fn new(op: WindowOp, window: Arc<dyn WindowControl>) -> Self {
        Self { op, window }
    }
}

#[async_trait]
impl HostFunction for WindowFunction {
    async fn call(&self, _ctx: &CallContext, args: Vec<Value>) -> Result<Value, HandlerError> {
        self.op.apply(self.window.as_ref(), &args)?;
        Ok(Value::Null)
    }
}

/// Install every `window.*` function against `window`.
pub fn register_window(registry: &mut FunctionRegistry, window: Arc<dyn WindowControl>) {
    for op in WindowOp::ALL {
        registry.register(
            op.function_name(),
            Arc::new(WindowFunction::new(op, Arc::clone(&window))),
        );
    }
}
