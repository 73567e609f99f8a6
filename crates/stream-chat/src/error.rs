//! Client error types.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::response::RateLimitHeaders;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Token signing failed.
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Reading a local upload failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Stream error code, when the body carried one.
        code: Option<i64>,
        /// Error message from the server, or the raw body.
        message: String,
        /// Raw response body.
        body: String,
        /// Rate-limit headers present on the failed response.
        rate_limit: RateLimitHeaders,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A call was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api { status: 401 | 403, .. })
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::Api { status: 429, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }

    /// Value of `x-ratelimit-limit` on the failed response.
    pub fn rate_limit_limit(&self) -> Option<u64> {
        self.rate_limit_headers().and_then(|r| r.limit)
    }

    /// Value of `x-ratelimit-remaining` on the failed response.
    pub fn rate_limit_remaining(&self) -> Option<u64> {
        self.rate_limit_headers().and_then(|r| r.remaining)
    }

    /// Value of `x-ratelimit-reset` on the failed response.
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        self.rate_limit_headers().and_then(|r| r.reset)
    }

    fn rate_limit_headers(&self) -> Option<&RateLimitHeaders> {
        match self {
            Error::Api { rate_limit, .. } => Some(rate_limit),
            _ => None,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the Stream API.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}
