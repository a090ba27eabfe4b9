//! Value shapes crossing the ClickUp boundary.
//!
//! Remote entities stay opaque JSON. Only the task page read by the
//! week-range aggregator gets a typed view, and it reads just the fields the
//! reduced task needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Outcome of one API invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    /// The decoded success body, unmodified.
    Success(Value),
    /// A normalized failure.
    Failure(ApiFailure),
}

impl ApiResponse {
    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }

    /// The JSON form handed back to protocol clients.
    pub fn to_json(&self) -> Value {
        match self {
            ApiResponse::Success(body) => body.clone(),
            ApiResponse::Failure(failure) => failure.to_json(),
        }
    }
}

/// Error envelope: `{error, status?}`.
///
/// `status` is present only when the service actually answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiFailure {
    pub error: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiFailure {
    pub fn to_json(&self) -> Value {
        let mut envelope = Map::new();
        envelope.insert("error".to_string(), self.error.clone());
        if let Some(status) = self.status {
            envelope.insert("status".to_string(), Value::from(status));
        }
        Value::Object(envelope)
    }

    /// Human-readable detail: the payload's `message` when it has one,
    /// otherwise the payload serialized as JSON.
    pub fn detail(&self) -> String {
        match self.error.get("message").and_then(Value::as_str) {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl From<Error> for ApiFailure {
    fn from(error: Error) -> Self {
        match error {
            Error::Api { status, body } => ApiFailure {
                error: body,
                status: Some(status),
            },
            other => ApiFailure {
                error: Value::String(other.to_string()),
                status: None,
            },
        }
    }
}

/// One page of `GET list/{id}/task`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub last_page: Option<bool>,
}

impl TaskPage {
    pub fn is_last(&self) -> bool {
        self.last_page == Some(true)
    }
}

/// A task with the handful of fields the aggregator reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub name: Value,

    /// Epoch milliseconds, as a number or a numeric string.
    #[serde(default)]
    pub date_closed: Value,

    #[serde(default)]
    pub assignees: Option<Vec<Assignee>>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    /// Parent task id; `null` for top-level tasks, absent if not reported.
    #[serde(default, deserialize_with = "present")]
    pub parent: Option<Value>,
}

impl Task {
    /// Closed timestamp in epoch milliseconds, if it parses.
    pub fn closed_at_ms(&self) -> Option<i64> {
        epoch_millis(&self.date_closed)
    }

    /// Username of the first assignee.
    pub fn first_assignee(&self) -> Option<&str> {
        self.assignees
            .as_deref()
            .and_then(<[Assignee]>::first)
            .and_then(|a| a.username.as_deref())
    }
}

/// Deserialize a field whose presence matters even when it is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignee {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub status: Value,
}

/// Reduced task shape returned by `getWeekTasks`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekTask {
    pub id: Value,
    pub name: Value,
    pub date_closed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    pub status: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<Value>,
}

/// Read an epoch-millisecond value given as a JSON number or numeric string.
///
/// Numeric strings are read up to the first non-digit, so `"1700000000000"`
/// and `"1700000000000.0"` both parse.
pub fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            let (sign, digits) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().ok().map(|n| sign * n)
        }
        _ => None,
    }
}
