//! Custom commands API.

use serde_json::Value;

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;

/// Commands API client.
pub struct CommandsApi {
    client: StreamClient,
}

impl CommandsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create a custom command.
    pub async fn create(&self, command: Value) -> Result<StreamResponse> {
        self.client.post("commands", &command).await
    }

    /// List commands.
    pub async fn list(&self) -> Result<StreamResponse> {
        self.client.get("commands", Query::new()).await
    }

    /// Get a custom command.
    pub async fn get(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("commands/{}", name), Query::new())
            .await
    }

    /// Replace a custom command.
    pub async fn update(&self, name: &str, command: Value) -> Result<StreamResponse> {
        self.client
            .put(&format!("commands/{}", name), &command, Query::new())
            .await
    }

    /// Delete a custom command.
    pub async fn delete(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("commands/{}", name), Query::new())
            .await
    }
}
