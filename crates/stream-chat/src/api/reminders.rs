//! Message reminders API.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::api::app::rfc3339;
use crate::client::StreamClient;
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{Object, SortOption, options_object};

/// Reminders API client.
pub struct RemindersApi {
    client: StreamClient,
}

impl RemindersApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    fn body(user_id: &str, remind_at: Option<DateTime<Utc>>) -> Object {
        let mut body = Object::new();
        body.insert("user_id".to_string(), json!(user_id));
        if remind_at.is_some() {
            body.insert("remind_at".to_string(), rfc3339(remind_at));
        }
        body
    }

    /// Create a reminder on a message. Without `remind_at` the message is
    /// only bookmarked.
    pub async fn create(
        &self,
        message_id: &str,
        user_id: &str,
        remind_at: Option<DateTime<Utc>>,
    ) -> Result<StreamResponse> {
        self.client
            .post(
                &format!("messages/{}/reminders", message_id),
                &Self::body(user_id, remind_at),
            )
            .await
    }

    /// Change when a reminder fires.
    pub async fn update(
        &self,
        message_id: &str,
        user_id: &str,
        remind_at: Option<DateTime<Utc>>,
    ) -> Result<StreamResponse> {
        self.client
            .patch(
                &format!("messages/{}/reminders", message_id),
                &Self::body(user_id, remind_at),
            )
            .await
    }

    /// Delete a reminder.
    pub async fn delete(&self, message_id: &str, user_id: &str) -> Result<StreamResponse> {
        self.client
            .delete(
                &format!("messages/{}/reminders", message_id),
                vec![("user_id".to_string(), user_id.to_string())],
            )
            .await
    }

    /// Query a user's reminders.
    pub async fn query(
        &self,
        user_id: &str,
        filter_conditions: Option<Value>,
        sort: &[SortOption],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut body = options_object(options, "options")?;
        body.insert("user_id".to_string(), json!(user_id));
        body.insert(
            "filter_conditions".to_string(),
            filter_conditions.unwrap_or_else(|| json!({})),
        );
        body.insert("sort".to_string(), serde_json::to_value(sort)?);
        self.client.post("reminders/query", &body).await
    }
}
