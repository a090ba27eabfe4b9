//! Outbound request values handed to the API invoker.

use reqwest::Method;
use serde::Serialize;

use crate::Error;

/// A single call against the ClickUp REST API.
///
/// `path` is relative to the versioned base URL. A leading `/v3` selects the
/// v3 API; anything else goes to v2. Query pairs keep their insertion order
/// and may repeat a key.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query pair.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a query pair only when a value is present.
    pub fn query_opt<T: ToString>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Append a query pair only when a non-empty string is present.
    pub fn query_non_empty(self, key: &str, value: Option<String>) -> Self {
        self.query_opt(key, value.filter(|v| !v.is_empty()))
    }

    /// Append one pair per element, all sharing `key`, in input order.
    pub fn query_each<T: ToString>(mut self, key: &str, values: Option<Vec<T>>) -> Self {
        for value in values.into_iter().flatten() {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Attach a JSON body.
    ///
    /// The invoker only transmits it for POST, PUT and PATCH.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Whether the method carries a body on the wire.
    pub fn sends_body(&self) -> bool {
        matches!(self.method, Method::POST | Method::PUT | Method::PATCH)
    }
}
