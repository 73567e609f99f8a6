//! Campaigns API.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{object_to_query, options_object};

/// Campaigns API client.
pub struct CampaignsApi {
    client: StreamClient,
}

impl CampaignsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create a campaign.
    pub async fn create(&self, campaign: Value) -> Result<StreamResponse> {
        self.client
            .post("campaigns", &json!({ "campaign": campaign }))
            .await
    }

    /// Get a campaign.
    pub async fn get(&self, campaign_id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("campaigns/{}", campaign_id), Query::new())
            .await
    }

    /// List campaigns; `options` (e.g. `limit`, `offset`) travel as query parameters.
    pub async fn list(&self, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client.get("campaigns", query).await
    }

    /// Replace a campaign.
    pub async fn update(&self, campaign_id: &str, campaign: Value) -> Result<StreamResponse> {
        self.client
            .put(
                &format!("campaigns/{}", campaign_id),
                &json!({ "campaign": campaign }),
                Query::new(),
            )
            .await
    }

    /// Delete a campaign.
    pub async fn delete(&self, campaign_id: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("campaigns/{}", campaign_id), Query::new())
            .await
    }

    /// Schedule a campaign to send at `send_at` (unix seconds).
    pub async fn schedule(&self, campaign_id: &str, send_at: i64) -> Result<StreamResponse> {
        self.client
            .patch(
                &format!("campaigns/{}/schedule", campaign_id),
                &json!({ "send_at": send_at }),
            )
            .await
    }

    /// Stop a running campaign.
    pub async fn stop(&self, campaign_id: &str) -> Result<StreamResponse> {
        self.client
            .patch(&format!("campaigns/{}/stop", campaign_id), &json!({}))
            .await
    }

    /// Resume a stopped campaign.
    pub async fn resume(&self, campaign_id: &str) -> Result<StreamResponse> {
        self.client
            .patch(&format!("campaigns/{}/resume", campaign_id), &json!({}))
            .await
    }

    /// Send the campaign to a set of test users.
    pub async fn test(&self, campaign_id: &str, users: Vec<Value>) -> Result<StreamResponse> {
        self.client
            .post(
                &format!("campaigns/{}/test", campaign_id),
                &json!({ "users": users }),
            )
            .await
    }
}
