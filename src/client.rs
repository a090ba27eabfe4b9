//! HTTP client for the ClickUp API.
//!
//! Every tool and resource funnels through [`ClickUpClient::invoke`], which
//! never fails: transport errors and non-success statuses are folded into an
//! [`ApiResponse::Failure`] so callers can hand the result straight back.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::request::ApiRequest;
use crate::types::{ApiFailure, ApiResponse};
use crate::Error;

const BASE_URL: &str = "https://api.clickup.com/api";
const DEFAULT_VERSION: &str = "v2";
const V3_MARKER: &str = "/v3";

/// Client for interacting with the ClickUp API.
///
/// The key is supplied per call because it may come from the inbound request.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClickUpClient {
    /// Create a new client pointing at the public ClickUp API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, Error> {
        let http = reqwest::Client::builder().build().map_err(Error::Http)?;

        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Returns the unversioned base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set a custom base URL (primarily for testing).
    #[doc(hidden)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Map a request path onto a full URL.
    ///
    /// A path starting with `/v3` is routed to the v3 API with the marker
    /// stripped; everything else goes to v2 unchanged.
    pub fn resolve_url(&self, path: &str) -> String {
        let (version, endpoint) = match path.strip_prefix(V3_MARKER) {
            Some(rest) => ("v3", rest),
            None => (DEFAULT_VERSION, path),
        };

        if endpoint.starts_with('/') {
            format!("{}/{}{}", self.base_url, version, endpoint)
        } else {
            format!("{}/{}/{}", self.base_url, version, endpoint)
        }
    }

    /// Perform a call and normalize the outcome.
    ///
    /// Success yields the decoded body untouched. A non-success status yields
    /// `{error: <decoded body>, status}`; any failure before a decodable
    /// response yields `{error: <message>}`.
    pub async fn invoke(&self, request: &ApiRequest, api_key: &str) -> ApiResponse {
        match self.send(request, api_key).await {
            Ok(body) => ApiResponse::Success(body),
            Err(e) => {
                warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "ClickUp call failed"
                );
                ApiResponse::Failure(ApiFailure::from(e))
            }
        }
    }

    async fn send(&self, request: &ApiRequest, api_key: &str) -> Result<serde_json::Value, Error> {
        let url = self.resolve_url(&request.path);
        let auth = HeaderValue::from_str(api_key).map_err(|_| Error::InvalidApiKey)?;

        debug!(method = %request.method, %url, query = ?request.query, "calling ClickUp");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(AUTHORIZATION, auth)
            .header(CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.sends_body() {
            if let Some(body) = &request.body {
                builder = builder.body(serde_json::to_vec(body)?);
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            decode_body(&text)
        } else {
            let body = serde_json::from_str(&text)?;
            Err(Error::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Decode a success body. ClickUp answers some deletes with no body at all.
fn decode_body(text: &str) -> Result<serde_json::Value, Error> {
    if text.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(text).map_err(Error::Parse)
}
