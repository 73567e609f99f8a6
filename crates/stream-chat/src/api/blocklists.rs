//! Blocklists API.

use serde_json::Value;

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;

/// Blocklists API client.
pub struct BlocklistsApi {
    client: StreamClient,
}

impl BlocklistsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create a blocklist (`{"name", "words"}`).
    pub async fn create(&self, blocklist: Value) -> Result<StreamResponse> {
        self.client.post("blocklists", &blocklist).await
    }

    /// List all blocklists.
    pub async fn list(&self) -> Result<StreamResponse> {
        self.client.get("blocklists", Query::new()).await
    }

    /// Get a blocklist by name.
    pub async fn get(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("blocklists/{}", name), Query::new())
            .await
    }

    /// Replace a blocklist's words.
    pub async fn update(&self, name: &str, blocklist: Value) -> Result<StreamResponse> {
        self.client
            .put(&format!("blocklists/{}", name), &blocklist, Query::new())
            .await
    }

    /// Delete a blocklist.
    pub async fn delete(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("blocklists/{}", name), Query::new())
            .await
    }
}
