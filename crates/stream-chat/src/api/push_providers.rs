//! Push providers API.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;

/// Push providers API client.
pub struct PushProvidersApi {
    client: StreamClient,
}

impl PushProvidersApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create or update a push provider.
    pub async fn upsert(&self, push_provider: Value) -> Result<StreamResponse> {
        self.client
            .post("push_providers", &json!({ "push_provider": push_provider }))
            .await
    }

    /// Delete the push provider `name` of kind `provider_type`.
    pub async fn delete(&self, provider_type: &str, name: &str) -> Result<StreamResponse> {
        self.client
            .delete(
                &format!("push_providers/{}/{}", provider_type, name),
                Query::new(),
            )
            .await
    }

    /// List push providers.
    pub async fn list(&self) -> Result<StreamResponse> {
        self.client.get("push_providers", Query::new()).await
    }
}
