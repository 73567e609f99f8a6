//! Roles and permissions API.

use serde_json::json;

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;

/// Permissions API client.
pub struct PermissionsApi {
    client: StreamClient,
}

impl PermissionsApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// List built-in and custom roles.
    pub async fn list_roles(&self) -> Result<StreamResponse> {
        self.client.get("roles", Query::new()).await
    }

    /// Create a custom role.
    pub async fn create_role(&self, name: &str) -> Result<StreamResponse> {
        self.client.post("roles", &json!({ "name": name })).await
    }

    /// Delete a custom role.
    pub async fn delete_role(&self, name: &str) -> Result<StreamResponse> {
        self.client
            .delete(&format!("roles/{}", name), Query::new())
            .await
    }

    /// List all permissions.
    pub async fn list_permissions(&self) -> Result<StreamResponse> {
        self.client.get("permissions", Query::new()).await
    }

    /// Get one permission.
    pub async fn get_permission(&self, id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("permissions/{}", id), Query::new())
            .await
    }
}
