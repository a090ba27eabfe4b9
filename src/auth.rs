//! API key resolution.
//!
//! A key sent by the caller in [`API_KEY_HEADER`] wins for that request only;
//! otherwise the key the process was started with is used. Empty values count
//! as absent.

use axum::http::request::Parts;
use axum::http::HeaderMap;
use rmcp::model::Extensions;

/// Inbound header carrying a per-request ClickUp API key.
pub const API_KEY_HEADER: &str = "x-clickup-api-key";

/// Environment variable holding the fallback key.
pub const API_KEY_ENV: &str = "CLICKUP_API_KEY";

/// Picks the API key for each call.
#[derive(Clone, Default)]
pub struct KeyResolver {
    fallback: Option<String>,
}

impl std::fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyResolver")
            .field("fallback", &self.fallback.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl KeyResolver {
    /// Create a resolver with an optional fallback key.
    pub fn new(fallback: Option<String>) -> Self {
        Self {
            fallback: fallback.filter(|k| !k.is_empty()),
        }
    }

    /// Create a resolver from the `CLICKUP_API_KEY` environment variable.
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve against the headers of the inbound request, if any.
    pub fn resolve(&self, headers: Option<&HeaderMap>) -> Option<String> {
        headers
            .and_then(|h| h.get(API_KEY_HEADER))
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback.clone())
    }

    /// Resolve against a protocol request context's extensions.
    ///
    /// The HTTP transports store the inbound request parts there; stdio
    /// requests carry none, so only the fallback applies.
    pub fn resolve_from(&self, extensions: &Extensions) -> Option<String> {
        self.resolve(extensions.get::<Parts>().map(|parts| &parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn headers_with(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_header_overrides_fallback() {
        let resolver = KeyResolver::new(Some("pk_env".to_string()));
        assert_eq!(
            resolver.resolve(Some(&headers_with("pk_header"))),
            Some("pk_header".to_string())
        );
    }

    #[test]
    fn test_falls_back_without_header() {
        let resolver = KeyResolver::new(Some("pk_env".to_string()));
        assert_eq!(resolver.resolve(None), Some("pk_env".to_string()));
        assert_eq!(
            resolver.resolve(Some(&HeaderMap::new())),
            Some("pk_env".to_string())
        );
    }

    #[test]
    fn test_empty_header_falls_back() {
        let resolver = KeyResolver::new(Some("pk_env".to_string()));
        assert_eq!(
            resolver.resolve(Some(&headers_with(""))),
            Some("pk_env".to_string())
        );
    }

    #[test]
    fn test_nothing_resolves_to_none() {
        let resolver = KeyResolver::new(None);
        assert_eq!(resolver.resolve(None), None);
        assert!(!resolver.has_fallback());
    }

    #[test]
    fn test_empty_fallback_is_absent() {
        let resolver = KeyResolver::new(Some(String::new()));
        assert_eq!(resolver.resolve(None), None);
    }

    #[test]
    fn test_header_name_is_case_insensitive() {
        let (parts, _) = Request::builder()
            .header("X-ClickUp-API-Key", "pk_mixed_case")
            .body(())
            .unwrap()
            .into_parts();
        let mut extensions = Extensions::new();
        extensions.insert(parts);

        let resolver = KeyResolver::new(None);
        assert_eq!(
            resolver.resolve_from(&extensions),
            Some("pk_mixed_case".to_string())
        );
    }

    #[test]
    fn test_extensions_without_parts_use_fallback() {
        let resolver = KeyResolver::new(Some("pk_env".to_string()));
        assert_eq!(
            resolver.resolve_from(&Extensions::new()),
            Some("pk_env".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let resolver = KeyResolver::new(Some("pk_secret".to_string()));
        assert!(!format!("{:?}", resolver).contains("pk_secret"));
    }
}
