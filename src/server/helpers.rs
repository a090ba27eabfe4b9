//! Helper functions for the MCP server.

use rmcp::model::{CallToolResult, Content, ErrorCode, ErrorData as McpError};
use serde_json::Value;

use crate::request::ApiRequest;
use crate::time::format_timestamp;
use crate::types::{epoch_millis, ApiResponse};
use crate::Error;

/// Text returned by a tool when no API key can be resolved.
pub const KEY_MISSING: &str = "API key missing.";

/// Task timestamp fields that get a `<field>_sgt` companion on `getTask`.
pub const ANNOTATED_TASK_DATES: &[&str] = &[
    "date_created",
    "date_updated",
    "due_date",
    "date_closed",
    "start_date",
];

/// Convert a Display error to an internal MCP error.
pub fn to_mcp_error(context: &str, error: impl std::fmt::Display) -> McpError {
    McpError::new(
        ErrorCode::INTERNAL_ERROR,
        format!("{}: {}", context, error),
        None,
    )
}

/// Create a validation error with the given message.
pub fn validation_error(message: &str) -> McpError {
    McpError::new(ErrorCode::INVALID_PARAMS, message.to_string(), None)
}

/// Unwrap a request whose body failed to serialize.
///
/// Only `Error::Parse` comes out of `ApiRequest::json`.
pub fn built(request: Result<ApiRequest, Error>) -> Result<ApiRequest, McpError> {
    request.map_err(|e| to_mcp_error("Failed to build request", e))
}

/// Wrap plain text as a tool result.
pub fn text_response(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Wrap an invoker result as compact JSON text.
///
/// Failures are still ordinary results; the payload carries the error.
pub fn api_response(response: &ApiResponse) -> CallToolResult {
    text_response(response.to_json().to_string())
}

/// Whether a field counts as set: not null, `false`, `0` or `""`.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Add `<field>_sgt` for each known timestamp on a task body.
///
/// Unset values and values that are not numeric are left alone.
pub fn annotate_task_dates(task: &mut Value) {
    let Some(fields) = task.as_object_mut() else {
        return;
    };

    for field in ANNOTATED_TASK_DATES {
        let formatted = fields
            .get(*field)
            .filter(|value| is_set(value))
            .and_then(epoch_millis)
            .and_then(format_timestamp);
        if let Some(formatted) = formatted {
            fields.insert(format!("{}_sgt", field), Value::String(formatted));
        }
    }
}
