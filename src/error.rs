//! Error types for the ClickUp MCP server.

use thiserror::Error;

/// Errors that can occur when talking to ClickUp or serving the protocol.
#[derive(Debug, Error)]
pub enum Error {
    /// The API key contains characters that cannot appear in an HTTP header.
    #[error("invalid API key format")]
    InvalidApiKey,

    /// An HTTP request failed before a response was obtained.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body or request payload could not be (de)serialized.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered with a non-success status.
    #[error("API error: HTTP {status}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The decoded error body.
        body: serde_json::Value,
    },

    /// A calendar date supplied by the caller could not be understood.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Binding or serving a transport failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
