//! Segments API.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{object_to_query, options_object};

/// Segments API client.
pub struct SegmentsApi {
    client: StreamClient,
}

impl SegmentsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create a segment.
    pub async fn create(&self, segment: Value) -> Result<StreamResponse> {
        self.client
            .post("segments", &json!({ "segment": segment }))
            .await
    }

    /// Get a segment.
    pub async fn get(&self, segment_id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("segments/{}", segment_id), Query::new())
            .await
    }

    /// List segments; `options` travel as query parameters.
    pub async fn list(&self, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client.get("segments", query).await
    }

    /// Update a segment.
    pub async fn update(&self, segment_id: &str, segment: Value) -> Result<StreamResponse> {
        self.client
            .put(
                &format!("segments/{}", segment_id),
                &json!({ "segment": segment }),
                Query::new(),
            )
            .await
    }

    /// Delete a segment.
    pub async fn delete(&self, segment_id: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("segments/{}", segment_id), Query::new())
            .await
    }
}
