//! Moderation API: bans, flags, reports and mutes.

use serde_json::{Value, json};

use crate::client::StreamClient;
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{object_to_query, options_object};

/// Moderation API client.
pub struct ModerationApi {
    client: StreamClient,
}

impl ModerationApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Ban a user app-wide, or from one channel when `type`/`id` are set.
    pub async fn ban_user(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("target_user_id".to_string(), json!(target_id));
        self.client.post("moderation/ban", &options).await
    }

    /// Lift a ban. Options travel as query parameters.
    pub async fn unban_user(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("target_user_id".to_string(), json!(target_id));
        self.client
            .delete("moderation/ban", object_to_query(options))
            .await
    }

    /// Shadow-ban a user: their messages are only visible to themselves.
    pub async fn shadow_ban(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("shadow".to_string(), Value::Bool(true));
        self.ban_user(target_id, Some(Value::Object(options))).await
    }

    /// Remove a shadow ban.
    pub async fn remove_shadow_ban(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("shadow".to_string(), Value::Bool(true));
        self.unban_user(target_id, Some(Value::Object(options))).await
    }

    /// Query banned users.
    pub async fn query_banned_users(
        &self,
        filter_conditions: Value,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("filter_conditions".to_string(), filter_conditions);
        self.client
            .get_with_payload("query_banned_users", &options)
            .await
    }

    /// Query flagged messages.
    pub async fn query_message_flags(
        &self,
        filter_conditions: Value,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("filter_conditions".to_string(), filter_conditions);
        self.client
            .get_with_payload("moderation/flags/message", &options)
            .await
    }

    async fn flag_op(
        &self,
        path: &str,
        key: &str,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert(key.to_string(), json!(target_id));
        self.client.post(path, &options).await
    }

    /// Flag a message. Options usually carry the flagging `user_id`.
    pub async fn flag_message(
        &self,
        message_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.flag_op("moderation/flag", "target_message_id", message_id, options)
            .await
    }

    /// Remove a message flag.
    pub async fn unflag_message(
        &self,
        message_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.flag_op("moderation/unflag", "target_message_id", message_id, options)
            .await
    }

    /// Flag a user.
    pub async fn flag_user(&self, user_id: &str, options: Option<Value>) -> Result<StreamResponse> {
        self.flag_op("moderation/flag", "target_user_id", user_id, options)
            .await
    }

    /// Remove a user flag.
    pub async fn unflag_user(
        &self,
        user_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.flag_op("moderation/unflag", "target_user_id", user_id, options)
            .await
    }

    /// Query flag reports.
    pub async fn query_flag_reports(&self, filter_conditions: Value) -> Result<StreamResponse> {
        self.client
            .post(
                "moderation/reports",
                &json!({ "filter_conditions": filter_conditions }),
            )
            .await
    }

    /// Review a flag report.
    pub async fn review_flag_report(
        &self,
        report_id: &str,
        review_result: &str,
        user_id: &str,
        details: Value,
    ) -> Result<StreamResponse> {
        self.client
            .patch(
                &format!("moderation/reports/{}", report_id),
                &json!({
                    "review_result": review_result,
                    "user_id": user_id,
                    "review_details": details,
                }),
            )
            .await
    }

    /// Mute `target_id` on behalf of `user_id`.
    pub async fn mute_user(&self, target_id: &str, user_id: &str) -> Result<StreamResponse> {
        self.client
            .post(
                "moderation/mute",
                &json!({"target_id": target_id, "user_id": user_id}),
            )
            .await
    }

    /// Unmute `target_id` on behalf of `user_id`.
    pub async fn unmute_user(&self, target_id: &str, user_id: &str) -> Result<StreamResponse> {
        self.client
            .post(
                "moderation/unmute",
                &json!({"target_id": target_id, "user_id": user_id}),
            )
            .await
    }
}
