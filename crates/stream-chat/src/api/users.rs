//! Users API.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::api::app::rfc3339;
use crate::client::{Query, StreamClient};
use crate::error::{Error, Result};
use crate::response::StreamResponse;
use crate::types::{Object, SortOption, into_object, object_to_query, options_object};

/// Users API client.
pub struct UsersApi {
    client: StreamClient,
}

impl UsersApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Create or replace users. Every user needs an `id`.
    pub async fn upsert_many(&self, users: Vec<Value>) -> Result<StreamResponse> {
        let mut by_id = Object::new();
        for user in users {
            let id = user
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::invalid("user must have an id"))?
                .to_string();
            by_id.insert(id, user);
        }
        self.client.post("users", &json!({ "users": by_id })).await
    }

    /// Create or replace one user.
    pub async fn upsert(&self, user: Value) -> Result<StreamResponse> {
        self.upsert_many(vec![user]).await
    }

    /// Partially update users; each update is `{"id", "set"?, "unset"?}`.
    pub async fn partial_update_many(&self, updates: Vec<Value>) -> Result<StreamResponse> {
        self.client.patch("users", &json!({ "users": updates })).await
    }

    /// Partially update one user.
    pub async fn partial_update(&self, update: Value) -> Result<StreamResponse> {
        self.partial_update_many(vec![update]).await
    }

    /// Delete a user synchronously. Options such as `mark_messages_deleted`
    /// or `hard_delete` travel as query parameters.
    pub async fn delete(&self, user_id: &str, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client.delete(&format!("users/{}", user_id), query).await
    }

    /// Delete users asynchronously; returns a task id.
    pub async fn delete_many(
        &self,
        user_ids: &[&str],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("user_ids".to_string(), json!(user_ids));
        self.client.post("users/delete", &options).await
    }

    /// Restore soft-deleted users.
    pub async fn restore(&self, user_ids: &[&str]) -> Result<StreamResponse> {
        self.client
            .post("users/restore", &json!({ "user_ids": user_ids }))
            .await
    }

    /// Deactivate a user; deactivated users cannot connect.
    pub async fn deactivate(
        &self,
        user_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let options = options_object(options, "options")?;
        self.client
            .post(&format!("users/{}/deactivate", user_id), &options)
            .await
    }

    /// Deactivate users asynchronously; returns a task id.
    pub async fn deactivate_many(
        &self,
        user_ids: &[&str],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("user_ids".to_string(), json!(user_ids));
        self.client.post("users/deactivate", &options).await
    }

    /// Reactivate a deactivated user.
    pub async fn reactivate(
        &self,
        user_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let options = options_object(options, "options")?;
        self.client
            .post(&format!("users/{}/reactivate", user_id), &options)
            .await
    }

    /// Reactivate users asynchronously; returns a task id.
    pub async fn reactivate_many(
        &self,
        user_ids: &[&str],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("user_ids".to_string(), json!(user_ids));
        self.client.post("users/reactivate", &options).await
    }

    /// Export a user with their messages and reactions.
    pub async fn export(&self, user_id: &str, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client
            .get(&format!("users/{}/export", user_id), query)
            .await
    }

    /// Create a guest user.
    pub async fn create_guest(&self, guest_request: Value) -> Result<StreamResponse> {
        self.client.post("guest", &guest_request).await
    }

    /// Query users.
    pub async fn query(
        &self,
        filter_conditions: Value,
        sort: &[SortOption],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("filter_conditions".to_string(), filter_conditions);
        options.insert("sort".to_string(), serde_json::to_value(sort)?);
        self.client.get_with_payload("users", &options).await
    }

    /// Send a custom event to a user's connections.
    pub async fn send_custom_event(&self, user_id: &str, event: Value) -> Result<StreamResponse> {
        self.client
            .post(&format!("users/{}/event", user_id), &json!({ "event": event }))
            .await
    }

    /// Revoke a user's tokens issued before `before`. `None` lifts the revocation.
    pub async fn revoke_token(
        &self,
        user_id: &str,
        before: Option<DateTime<Utc>>,
    ) -> Result<StreamResponse> {
        self.revoke_tokens(&[user_id], before).await
    }

    /// Revoke tokens for several users.
    pub async fn revoke_tokens(
        &self,
        user_ids: &[&str],
        before: Option<DateTime<Utc>>,
    ) -> Result<StreamResponse> {
        let before = rfc3339(before);
        let updates = user_ids
            .iter()
            .map(|id| json!({"id": id, "set": {"revoke_tokens_issued_before": before}}))
            .collect();
        self.partial_update_many(updates).await
    }

    /// Unread counts for one user.
    pub async fn unread_counts(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .get("unread", vec![("user_id".to_string(), user_id.to_string())])
            .await
    }

    /// Unread counts for several users.
    pub async fn unread_counts_batch(&self, user_ids: &[&str]) -> Result<StreamResponse> {
        self.client
            .post("unread_batch", &json!({ "user_ids": user_ids }))
            .await
    }

    /// A user's active live locations.
    pub async fn active_live_locations(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .get(
                "users/live_locations",
                vec![("user_id".to_string(), user_id.to_string())],
            )
            .await
    }

    /// Update the live location shared in `message_id`.
    ///
    /// `location` holds `latitude`, `longitude` and optional extras such as
    /// `accuracy` or `end_at`.
    pub async fn update_live_location(
        &self,
        user_id: &str,
        message_id: &str,
        location: Value,
    ) -> Result<StreamResponse> {
        let mut body = into_object(location, "location")?;
        body.insert("message_id".to_string(), json!(message_id));
        let query: Query = vec![("user_id".to_string(), user_id.to_string())];
        self.client.put("users/live_locations", &body, query).await
    }
}
