//! Imports API.
//!
//! An import runs in three steps: request an upload URL, upload the file
//! there, then create the import from the returned path.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{object_to_query, options_object};

/// Imports API client.
pub struct ImportsApi {
    client: StreamClient,
}

impl ImportsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Request a pre-signed upload URL for `filename`.
    pub async fn create_url(&self, filename: &str) -> Result<StreamResponse> {
        self.client
            .post("import_urls", &json!({ "filename": filename }))
            .await
    }

    /// Start an import from an uploaded file. `mode` is `insert` or `upsert`.
    pub async fn create(&self, path: &str, mode: &str) -> Result<StreamResponse> {
        self.client
            .post("imports", &json!({"path": path, "mode": mode}))
            .await
    }

    /// Get an import and its status.
    pub async fn get(&self, id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("imports/{}", id), Query::new())
            .await
    }

    /// List imports; `options` (e.g. `limit`) travel as query parameters.
    pub async fn list(&self, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client.get("imports", query).await
    }
}
