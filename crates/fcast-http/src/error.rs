//! Internal error types for HTTP operations.
//!
//! These errors are internal to `fcast-http` and are mapped to
//! `ForecastError` at the port boundary.

use thiserror::Error;

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors from the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request failed with an HTTP error status.
    #[error("Request failed: {status_text} ({status}) {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, empty if unknown
        status_text: String,
        /// The URL that was requested
        url: String,
    },

    /// The response body was not what was expected.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HttpError {
    /// Build a status failure from a status code.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self::ApiRequestFailed {
            status,
            status_text,
            url: url.into(),
        }
    }
}
