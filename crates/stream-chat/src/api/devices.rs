//! Push devices API.

use serde_json::json;

use crate::client::StreamClient;
use crate::error::Result;
use crate::response::StreamResponse;

/// Devices API client.
pub struct DevicesApi {
    client: StreamClient,
}

impl DevicesApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Register a device for push notifications.
    ///
    /// `push_provider` is e.g. `firebase` or `apn`; `push_provider_name`
    /// selects one of several configured providers of that kind.
    pub async fn add(
        &self,
        device_id: &str,
        push_provider: &str,
        user_id: &str,
        push_provider_name: Option<&str>,
    ) -> Result<StreamResponse> {
        self.client
            .post(
                "devices",
                &json!({
                    "id": device_id,
                    "push_provider": push_provider,
                    "push_provider_name": push_provider_name,
                    "user_id": user_id,
                }),
            )
            .await
    }

    /// Remove a device.
    pub async fn delete(&self, device_id: &str, user_id: &str) -> Result<StreamResponse> {
        let query = vec![
            ("id".to_string(), device_id.to_string()),
            ("user_id".to_string(), user_id.to_string()),
        ];
        self.client.delete("devices", query).await
    }

    /// List a user's devices.
    pub async fn list(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .get("devices", vec![("user_id".to_string(), user_id.to_string())])
            .await
    }
}
