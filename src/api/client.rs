//! HTTP client wrapper for the booking backend
//!
//! Thin layer over `reqwest` that resolves the base URL, attaches default
//! JSON headers, and logs every outgoing request and every failure. There
//! is deliberately no retry, timeout, or auth handling here: the backend
//! owns consistency and the client surfaces its answers as-is.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::config::Config;
use crate::error::{ConciergeError, Result};

/// Default backend address when neither the environment nor the config
/// file provide one
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the configured base URL
pub const BASE_URL_ENV: &str = "CONCIERGE_API_URL";

/// Error envelope the backend uses for failed requests
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

/// Booking backend API client
#[derive(Clone)]
pub struct ApiClient {
    /// The reqwest instance
    inner: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl ApiClient {
    /// Create a client, resolving the base URL from the environment, the
    /// config file, or the default local address (in that order)
    pub fn new() -> Result<Self> {
        let base_url = match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => Config::load()
                .map(|c| c.base_url)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };

        Self::with_base_url(base_url)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let inner = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a path and parse the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "request sent");

        let response = self.inner.get(&url).send().await.inspect_err(|e| {
            tracing::error!(%url, error = %e, "network error");
        })?;

        Self::parse_response(response).await
    }

    /// POST to a path with an empty JSON body and parse the JSON response
    pub async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(%url, "request sent");

        let response = self
            .inner
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .inspect_err(|e| {
                tracing::error!(%url, error = %e, "network error");
            })?;

        Self::parse_response(response).await
    }

    /// Turn an HTTP response into a typed body or an error carrying the
    /// backend's error payload
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = interpret_error(status, &body);
            tracing::error!(%status, error = %err, "response error");
            return Err(err);
        }

        let body = response.json::<T>().await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to parse response body");
        })?;

        Ok(body)
    }
}

/// Extract the backend's `{"error": ...}` payload from a failed response,
/// falling back to the raw body or the status line
fn interpret_error(status: StatusCode, body: &str) -> ConciergeError {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        return ConciergeError::Api(payload.error);
    }

    if body.trim().is_empty() {
        ConciergeError::Api(format!("request failed with status {}", status))
    } else {
        ConciergeError::Api(format!("request failed ({}): {}", status, body.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_error_extracts_payload() {
        let err = interpret_error(
            StatusCode::BAD_REQUEST,
            r#"{"error": "Room 3 is already booked"}"#,
        );
        assert!(matches!(
            err,
            ConciergeError::Api(msg) if msg == "Room 3 is already booked"
        ));
    }

    #[test]
    fn test_interpret_error_falls_back_to_raw_body() {
        let err = interpret_error(StatusCode::INTERNAL_SERVER_ERROR, "gateway exploded");
        assert!(matches!(
            err,
            ConciergeError::Api(msg) if msg.contains("gateway exploded")
        ));
    }

    #[test]
    fn test_interpret_error_empty_body_uses_status() {
        let err = interpret_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(
            err,
            ConciergeError::Api(msg) if msg.contains("404")
        ));
    }

    #[test]
    fn test_url_joining_normalizes_slashes() {
        let client = ApiClient::with_base_url("http://localhost:5000/").unwrap();
        assert_eq!(client.url("/rooms"), "http://localhost:5000/rooms");
        assert_eq!(client.url("rooms/3/book"), "http://localhost:5000/rooms/3/book");
    }
}
