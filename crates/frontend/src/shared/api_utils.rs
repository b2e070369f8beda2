//! API utilities for frontend-backend communication
//!
//! Builds API URLs from the window location and maps failed responses into
//! [`ApiError`], keeping the server-supplied message when there is one.

use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::Response;
use std::fmt;

/// Port the backend listens on (see `[server] port` in the backend config)
pub const API_PORT: u16 = 3000;

/// Base URL for API requests, e.g. "http://localhost:3000".
///
/// Empty string when there is no window (tests, workers).
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Full API URL for a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Transport or backend failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status; `None` when the request never got a response
    pub status: Option<u16>,
    /// Human-readable message supplied by the server, never set client-side
    pub message: Option<String>,
    /// Client-side diagnostic (network, (de)serialization); for logs only
    pub detail: Option<String>,
}

impl ApiError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            message: None,
            detail: Some(detail.into()),
        }
    }

    pub fn status(status: u16, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            message,
            detail: None,
        }
    }

    /// Server message, or `fallback` when the server gave none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.message.as_ref().or(self.detail.as_ref());
        match (self.status, text) {
            (Some(status), Some(text)) => write!(f, "HTTP {}: {}", status, text),
            (Some(status), None) => write!(f, "HTTP {}", status),
            (None, Some(text)) => write!(f, "{}", text),
            (None, None) => write!(f, "request failed"),
        }
    }
}

/// Turn a non-2xx response into an [`ApiError`], reading an optional `message` body
pub async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    log::warn!("api: HTTP {} ({:?})", status, message);
    ApiError::status(status, message)
}

/// `Ok(body)` for 2xx responses, the server error otherwise
pub async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to parse response: {}", e)))
}

/// POST without a body, expecting no payload back (e.g. test data seeding)
pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    let response = gloo_net::http::Request::post(&api_url(path))
        .send()
        .await
        .map_err(|e| ApiError::transport(format!("Failed to send request: {}", e)))?;
    if !response.ok() {
        return Err(error_from_response(response).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_or_prefers_server_message() {
        let err = ApiError::status(400, Some("Grade '9' is not offered".into()));
        assert_eq!(err.message_or("generic"), "Grade '9' is not offered");
    }

    #[test]
    fn test_message_or_falls_back() {
        assert_eq!(ApiError::status(500, None).message_or("generic"), "generic");
        assert_eq!(
            ApiError::status(500, Some("  ".into())).message_or("generic"),
            "generic"
        );
    }

    #[test]
    fn test_transport_detail_never_reaches_the_user() {
        let err = ApiError::transport("Failed to send request: TypeError: NetworkError");
        assert_eq!(err.message, None);
        assert_eq!(err.message_or("generic"), "generic");
        assert_eq!(
            err.to_string(),
            "Failed to send request: TypeError: NetworkError"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::status(404, None).to_string(), "HTTP 404");
        assert_eq!(ApiError::transport("offline").to_string(), "offline");
    }
}
