//! Channel-wide operations: querying, bulk deletes, exports and batch updates.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::{Error, Result};
use crate::response::StreamResponse;
use crate::types::{ChannelsBatchRequest, SortOption, options_object, user_ref};

/// Channels API client.
pub struct ChannelsApi {
    client: StreamClient,
}

impl ChannelsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Query channels.
    ///
    /// `state` defaults to `true`, `watch` and `presence` to `false` unless
    /// `options` sets them. The filter must not be empty.
    pub async fn query(
        &self,
        filter_conditions: Value,
        sort: &[SortOption],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let empty = match &filter_conditions {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            return Err(Error::invalid("filterConditions can't be empty"));
        }

        let mut options = options_object(options, "options")?;
        options.entry("state").or_insert(Value::Bool(true));
        options.entry("watch").or_insert(Value::Bool(false));
        options.entry("presence").or_insert(Value::Bool(false));
        options.insert("filter_conditions".to_string(), filter_conditions);
        options.insert("sort".to_string(), serde_json::to_value(sort)?);
        self.client.post("channels", &options).await
    }

    /// Delete channels asynchronously; returns a task id.
    pub async fn delete_many(
        &self,
        cids: &[&str],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("cids".to_string(), json!(cids));
        self.client.post("channels/delete", &options).await
    }

    /// Mark every channel read for `user_id`.
    pub async fn mark_all_read(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .post("channels/read", &json!({ "user": user_ref(user_id) }))
            .await
    }

    /// Apply a batch operation to all channels matching a filter.
    ///
    /// See [`ChannelBatchUpdater`](crate::ChannelBatchUpdater) for typed helpers.
    pub async fn update_batch(&self, request: &ChannelsBatchRequest) -> Result<StreamResponse> {
        self.client.put("channels/batch", request, Query::new()).await
    }

    /// Export channels; each request is `{"type", "id", ...}`.
    pub async fn export_many(
        &self,
        requests: Vec<Value>,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("channels".to_string(), Value::Array(requests));
        self.client.post("export_channels", &options).await
    }

    /// Export one channel.
    pub async fn export(&self, request: Value, options: Option<Value>) -> Result<StreamResponse> {
        self.export_many(vec![request], options).await
    }

    /// Status of an export task.
    pub async fn export_status(&self, id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("export_channels/{}", id), Query::new())
            .await
    }
}
