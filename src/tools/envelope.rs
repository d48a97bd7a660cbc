//! Uniform text envelopes returned by every tool.
//!
//! Success is the verbatim JSON of the backend result. Failure is
//! `{"success": false, "error": "Error <doing X>: <message>"}`. Callers tell
//! the two apart by shape alone.

use serde_json::Value;

use crate::observability::LOG_TARGET;
use crate::types::{Error, Result};

/// Build the error envelope for a human-readable message.
pub fn format_error_response(error_message: &str) -> String {
    serde_json::json!({
        "success": false,
        "error": error_message,
    })
    .to_string()
}

/// Whether a tool result text is the error envelope.
pub fn is_error_response(text: &str) -> bool {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => {
            map.get("success") == Some(&Value::Bool(false)) && map.contains_key("error")
        }
        _ => false,
    }
}

/// Render a backend result as tool output text.
///
/// `action` names what the tool was doing, e.g. `"fetching mealplans"`, and
/// prefixes the error message on failure.
pub fn render(action: &str, result: Result<Value>) -> String {
    let text = result.and_then(|value| serde_json::to_string(&value).map_err(Error::from));
    match text {
        Ok(text) => text,
        Err(err) => failure(action, &err),
    }
}

/// Log a failure (error + debug trace) and return its envelope.
pub fn failure(action: &str, err: &Error) -> String {
    let error_msg = format!("Error {}: {}", action, err);
    tracing::error!(target: LOG_TARGET, "{}", error_msg);
    tracing::debug!(
        target: LOG_TARGET,
        traceback = %diagnostic_trace(err),
        "Error traceback"
    );
    format_error_response(&error_msg)
}

/// Source chain of the error followed by its Debug rendering.
fn diagnostic_trace(err: &Error) -> String {
    let mut trace = err.chain().join("\n  caused by: ");
    trace.push('\n');
    trace.push_str(&format!("{:?}", err));
    trace
}
