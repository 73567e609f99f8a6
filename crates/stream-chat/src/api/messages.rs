//! Messages API.

use chrono::{DateTime, Utc};
use serde_json::{Value, json};

use crate::api::app::rfc3339;
use crate::client::{Query, StreamClient};
use crate::error::{Error, Result};
use crate::response::StreamResponse;
use crate::types::{
    SearchQuery, SortOption, into_object, object_to_query, options_object, user_ref,
};

/// Messages API client.
pub struct MessagesApi {
    client: StreamClient,
}

impl MessagesApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Get a message by id.
    pub async fn get(&self, message_id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("messages/{}", message_id), Query::new())
            .await
    }

    /// Replace a message. The message must carry its `id`.
    pub async fn update(&self, message: Value) -> Result<StreamResponse> {
        let message_id = message
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid("A message must have an id"))?
            .to_string();
        self.client
            .post(
                &format!("messages/{}", message_id),
                &json!({ "message": message }),
            )
            .await
    }

    /// Set and/or unset message fields.
    ///
    /// `updates` is `{"set": {..}, "unset": [..]}`; it is merged over
    /// `options`, with the acting user added when given.
    pub async fn partial_update(
        &self,
        message_id: &str,
        updates: Value,
        user_id: Option<&str>,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut payload = options_object(options, "options")?;
        if let Some(user_id) = user_id {
            payload.insert("user".to_string(), user_ref(user_id));
        }
        payload.extend(into_object(updates, "updates")?);
        self.client
            .put(&format!("messages/{}", message_id), &payload, Query::new())
            .await
    }

    /// Pin a message, optionally until `expiration`.
    pub async fn pin(
        &self,
        message_id: &str,
        user_id: &str,
        expiration: Option<DateTime<Utc>>,
    ) -> Result<StreamResponse> {
        let updates = json!({"set": {"pinned": true, "pin_expires": rfc3339(expiration)}});
        self.partial_update(message_id, updates, Some(user_id), None)
            .await
    }

    /// Unpin a message.
    pub async fn unpin(&self, message_id: &str, user_id: &str) -> Result<StreamResponse> {
        let updates = json!({"set": {"pinned": false}});
        self.partial_update(message_id, updates, Some(user_id), None)
            .await
    }

    /// Delete a message. Options such as `hard` or `deleted_by` travel as
    /// query parameters.
    pub async fn delete(&self, message_id: &str, options: Option<Value>) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client
            .delete(&format!("messages/{}", message_id), query)
            .await
    }

    /// Commit a pending message.
    pub async fn commit(&self, message_id: &str) -> Result<StreamResponse> {
        self.client
            .post(&format!("messages/{}/commit", message_id), &json!({}))
            .await
    }

    /// Run a message action (e.g. a giphy shuffle) as `user_id`.
    pub async fn send_action(
        &self,
        message_id: &str,
        user_id: &str,
        form_data: Value,
    ) -> Result<StreamResponse> {
        self.client
            .post(
                &format!("messages/{}/action", message_id),
                &json!({"user_id": user_id, "form_data": form_data}),
            )
            .await
    }

    /// Translate a message into `language`.
    pub async fn translate(&self, message_id: &str, language: &str) -> Result<StreamResponse> {
        self.client
            .post(
                &format!("messages/{}/translate", message_id),
                &json!({ "language": language }),
            )
            .await
    }

    /// Search messages across the channels matching `filter_conditions`.
    ///
    /// `options.sort` may use the `{"field": direction}` shorthand. A positive
    /// `offset` cannot be combined with `next` or `sort`.
    pub async fn search(
        &self,
        filter_conditions: Value,
        query: impl Into<SearchQuery>,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;

        let offset = options.get("offset").and_then(Value::as_i64).unwrap_or(0);
        if offset > 0 && (options.contains_key("next") || options.contains_key("sort")) {
            return Err(Error::invalid(
                "Cannot use offset with next or sort parameters",
            ));
        }

        options.insert("filter_conditions".to_string(), filter_conditions);
        match query.into() {
            SearchQuery::Text(text) => {
                options.insert("query".to_string(), Value::String(text));
            }
            SearchQuery::Filter(filter) => {
                options.insert("message_filter_conditions".to_string(), filter);
            }
        }

        let sort = match options.get("sort") {
            Some(sort) => SortOption::from_shorthand(sort)?,
            None => Vec::new(),
        };
        options.insert("sort".to_string(), serde_json::to_value(sort)?);

        self.client.get_with_payload("search", &options).await
    }
}
