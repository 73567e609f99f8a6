//! Channel types API.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::into_object;

/// Channel types API client.
pub struct ChannelTypesApi {
    client: StreamClient,
}

impl ChannelTypesApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create a channel type. `commands` defaults to `["all"]`.
    pub async fn create(&self, data: Value) -> Result<StreamResponse> {
        let mut data = into_object(data, "channel type")?;
        let has_commands = data
            .get("commands")
            .and_then(Value::as_array)
            .is_some_and(|commands| !commands.is_empty());
        if !has_commands {
            data.insert("commands".to_string(), json!(["all"]));
        }
        self.client.post("channeltypes", &data).await
    }

    /// Get a channel type.
    pub async fn get(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("channeltypes/{}", name), Query::new())
            .await
    }

    /// List all channel types.
    pub async fn list(&self) -> Result<StreamResponse> {
        self.client.get("channeltypes", Query::new()).await
    }

    /// Update a channel type's settings.
    pub async fn update(&self, name: &str, settings: Value) -> Result<StreamResponse> {
        self.client
            .put(&format!("channeltypes/{}", name), &settings, Query::new())
            .await
    }

    /// Delete a channel type.
    pub async fn delete(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("channeltypes/{}", name), Query::new())
            .await
    }
}
