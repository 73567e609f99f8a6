//! App settings API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::RateLimitsQuery;

/// App settings API client.
pub struct AppApi {
    client: StreamClient,
}

impl AppApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Get the application settings.
    pub async fn get_settings(&self) -> Result<StreamResponse> {
        self.client.get("app", Query::new()).await
    }

    /// Update application settings.
    pub async fn update_settings(&self, settings: Value) -> Result<StreamResponse> {
        self.client.patch("app", &settings).await
    }

    /// Send a test push notification.
    pub async fn check_push(&self, push_settings: Value) -> Result<StreamResponse> {
        self.client.post("check_push", &push_settings).await
    }

    /// Test the SQS event hook configuration.
    pub async fn check_sqs(&self, sqs_settings: Value) -> Result<StreamResponse> {
        self.client.post("check_sqs", &sqs_settings).await
    }

    /// Test the SNS event hook configuration.
    pub async fn check_sns(&self, sns_settings: Value) -> Result<StreamResponse> {
        self.client.post("check_sns", &sns_settings).await
    }

    /// Report the app's rate limits.
    pub async fn rate_limits(&self, query: &RateLimitsQuery) -> Result<StreamResponse> {
        self.client.get("rate_limits", query.to_query()).await
    }

    /// Revoke every token issued before `before`. `None` lifts the revocation.
    pub async fn revoke_tokens(&self, before: Option<DateTime<Utc>>) -> Result<StreamResponse> {
        self.update_settings(json!({ "revoke_tokens_issued_before": rfc3339(before) }))
            .await
    }
}

pub(crate) fn rfc3339(at: Option<DateTime<Utc>>) -> Value {
    match at {
        Some(at) => Value::String(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => Value::Null,
    }
}
