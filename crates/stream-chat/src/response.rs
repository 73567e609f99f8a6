//! Response wrapper carrying the decoded body and HTTP metadata.

use std::ops::Deref;

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde_json::Value;

pub(crate) const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
pub(crate) const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
pub(crate) const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Rate-limit quota reported by the API for the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Max amount of requests in the current period.
    pub limit: u64,
    /// Requests remaining in the current period.
    pub remaining: u64,
    /// When the current period ends.
    pub reset: DateTime<Utc>,
}

/// Individually optional rate-limit header values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitHeaders {
    pub limit: Option<u64>,
    pub remaining: Option<u64>,
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimitHeaders {
    /// Parse the `x-ratelimit-*` headers. Missing or malformed values are `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_u64(headers, RATE_LIMIT_LIMIT),
            remaining: header_u64(headers, RATE_LIMIT_REMAINING),
            reset: header_u64(headers, RATE_LIMIT_RESET)
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        }
    }

    /// All three values, if every header was present.
    pub fn complete(&self) -> Option<RateLimit> {
        Some(RateLimit {
            limit: self.limit?,
            remaining: self.remaining?,
            reset: self.reset?,
        })
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// A decoded API response.
///
/// Dereferences to the JSON body, so fields can be indexed directly:
///
/// ```no_run
/// # fn example(response: stream_chat::StreamResponse) {
/// let id = response["channel"]["id"].as_str();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StreamResponse {
    body: Value,
    status: u16,
    headers: HeaderMap,
    rate_limit: Option<RateLimit>,
}

impl StreamResponse {
    pub(crate) fn from_parts(status: u16, headers: HeaderMap, body: Value) -> Self {
        let rate_limit = RateLimitHeaders::from_headers(&headers).complete();
        Self {
            body,
            status,
            headers,
            rate_limit,
        }
    }

    /// Rate limits reported with this response, when all three headers were sent.
    pub fn rate_limit(&self) -> Option<&RateLimit> {
        self.rate_limit.as_ref()
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Decoded JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the response, keeping only the body.
    pub fn into_body(self) -> Value {
        self.body
    }
}

impl Deref for StreamResponse {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.body
    }
}
