//! Rendering of console arguments into a single log line.

use serde_json::Value;

/// Join console arguments the way a browser console prints them: strings
/// verbatim, every other value as compact JSON, separated by one space.
pub fn render_line(args: &[Value]) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
