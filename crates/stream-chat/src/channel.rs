//! Channel facade.

use serde_json::{Value, json};

use crate::client::{Query, StreamClient};
use crate::error::{Error, Result};
use crate::response::StreamResponse;
use crate::types::{
    ChannelMember, FileSource, Object, SortOption, into_object, object_to_query, options_object,
    user_ref,
};

/// A handle on one channel.
///
/// Created with [`StreamClient::channel`]. Holds the channel type, its id (if
/// known) and the custom data sent when the channel is created or queried.
#[derive(Debug, Clone)]
pub struct Channel {
    client: StreamClient,
    channel_type: String,
    id: Option<String>,
    custom_data: Value,
}

impl Channel {
    pub(crate) fn new(
        client: StreamClient,
        channel_type: &str,
        id: Option<&str>,
        data: Option<Value>,
    ) -> Self {
        Self {
            client,
            channel_type: channel_type.to_string(),
            id: id.map(str::to_string),
            custom_data: data.unwrap_or(Value::Null),
        }
    }

    /// Channel type, e.g. `messaging`.
    pub fn channel_type(&self) -> &str {
        &self.channel_type
    }

    /// Channel id, once known.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Custom data sent with create and query calls.
    ///
    /// Must be a JSON object (or `null`); anything else fails `create` and
    /// `query` with [`Error::InvalidArgument`].
    pub fn custom_data(&self) -> &Value {
        &self.custom_data
    }

    /// Composite channel id, `"{type}:{id}"`.
    pub fn cid(&self) -> String {
        format!("{}:{}", self.channel_type, self.id.as_deref().unwrap_or_default())
    }

    fn url(&self) -> Result<String> {
        match &self.id {
            Some(id) if !id.is_empty() => Ok(format!("channels/{}/{}", self.channel_type, id)),
            _ => Err(Error::invalid("Channel does not (yet) have an id")),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messages, events and reactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Send a message as `user_id`, optionally as a reply in a thread.
    pub async fn send_message(
        &self,
        message: Value,
        user_id: &str,
        parent_id: Option<&str>,
    ) -> Result<StreamResponse> {
        let mut message = into_object(message, "message")?;
        if let Some(parent_id) = parent_id {
            message.insert("parent_id".to_string(), json!(parent_id));
        }
        message.insert("user".to_string(), user_ref(user_id));
        self.client
            .post(&format!("{}/message", self.url()?), &json!({ "message": message }))
            .await
    }

    /// Fetch several messages of this channel by id.
    pub async fn get_many_messages(&self, message_ids: &[&str]) -> Result<StreamResponse> {
        let query = vec![("ids".to_string(), message_ids.join(","))];
        self.client
            .get(&format!("{}/messages", self.url()?), query)
            .await
    }

    /// Send a custom event as `user_id`.
    pub async fn send_event(&self, event: Value, user_id: &str) -> Result<StreamResponse> {
        let mut event = into_object(event, "event")?;
        event.insert("user".to_string(), user_ref(user_id));
        self.client
            .post(&format!("{}/event", self.url()?), &json!({ "event": event }))
            .await
    }

    /// React to a message as `user_id`.
    pub async fn send_reaction(
        &self,
        message_id: &str,
        reaction: Value,
        user_id: &str,
    ) -> Result<StreamResponse> {
        let mut reaction = into_object(reaction, "reaction")?;
        reaction.insert("user".to_string(), user_ref(user_id));
        self.client
            .post(
                &format!("messages/{}/reaction", message_id),
                &json!({ "reaction": reaction }),
            )
            .await
    }

    /// Remove a reaction of `reaction_type` by `user_id`.
    pub async fn delete_reaction(
        &self,
        message_id: &str,
        reaction_type: &str,
        user_id: &str,
    ) -> Result<StreamResponse> {
        self.client
            .delete(
                &format!("messages/{}/reaction/{}", message_id, reaction_type),
                vec![("user_id".to_string(), user_id.to_string())],
            )
            .await
    }

    /// List replies to a thread parent.
    pub async fn get_replies(
        &self,
        parent_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client
            .get(&format!("messages/{}/replies", parent_id), query)
            .await
    }

    /// List reactions on a message.
    pub async fn get_reactions(
        &self,
        message_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let query = object_to_query(options_object(options, "options")?);
        self.client
            .get(&format!("messages/{}/reactions", message_id), query)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the channel as `user_id`, then add `members` if given.
    pub async fn create(
        &mut self,
        user_id: &str,
        members: Option<&[&str]>,
    ) -> Result<StreamResponse> {
        let mut data = into_object(self.custom_data.clone(), "data")?;
        data.insert("created_by".to_string(), user_ref(user_id));
        self.custom_data = Value::Object(data);
        let response = self
            .query(json!({"watch": false, "state": false, "presence": false}))
            .await?;
        if let Some(members) = members {
            self.add_members(members, None).await?;
        }
        Ok(response)
    }

    /// Get or create the channel.
    ///
    /// `state` defaults to `true` and `data` to this handle's custom data. An
    /// id-less channel adopts the id the server assigns.
    pub async fn query(&mut self, options: Value) -> Result<StreamResponse> {
        let data = into_object(self.custom_data.clone(), "data")?;
        let mut options = into_object(options, "options")?;
        options.entry("state").or_insert(Value::Bool(true));
        options.entry("data").or_insert(Value::Object(data));

        let id = self.id.as_deref().filter(|id| !id.is_empty());
        let url = match id {
            Some(id) => format!("channels/{}/{}/query", self.channel_type, id),
            None => format!("channels/{}/query", self.channel_type),
        };
        let adopt_id = id.is_none();
        let response = self.client.post(&url, &options).await?;

        if adopt_id {
            if let Some(id) = response["channel"]["id"].as_str() {
                self.id = Some(id.to_string());
            }
        }
        Ok(response)
    }

    /// Query the channel's members.
    pub async fn query_members(
        &self,
        filter_conditions: Option<Value>,
        sort: &[SortOption],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            options.insert("id".to_string(), json!(id));
        } else if let Some(members @ Value::Array(_)) = self.custom_data.get("members") {
            // distinct channel, addressed by its member list
            options.insert("members".to_string(), members.clone());
        }
        options.insert("type".to_string(), json!(self.channel_type));
        options.insert(
            "filter_conditions".to_string(),
            filter_conditions.unwrap_or_else(|| json!({})),
        );
        options.insert("sort".to_string(), serde_json::to_value(sort)?);
        self.client.get_with_payload("members", &options).await
    }

    /// Full update of the channel data, optionally posting a system message.
    ///
    /// Keys of `options` are merged into the request body.
    pub async fn update(
        &self,
        channel_data: Option<Value>,
        update_message: Option<Value>,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut payload = Object::new();
        payload.insert("data".to_string(), channel_data.unwrap_or(Value::Null));
        payload.insert("message".to_string(), update_message.unwrap_or(Value::Null));
        payload.extend(options_object(options, "options")?);
        self.client.post(&self.url()?, &payload).await
    }

    /// Set and/or unset individual channel fields.
    pub async fn update_partial(
        &self,
        set: Option<Value>,
        unset: Option<Vec<String>>,
    ) -> Result<StreamResponse> {
        if set.is_none() && unset.is_none() {
            return Err(Error::invalid("set or unset is required"));
        }
        self.client
            .patch(&self.url()?, &json!({ "set": set, "unset": unset }))
            .await
    }

    /// Delete the channel.
    pub async fn delete(&self) -> Result<StreamResponse> {
        self.client.delete(&self.url()?, Query::new()).await
    }

    /// Remove all messages from the channel.
    pub async fn truncate(&self, options: Option<Value>) -> Result<StreamResponse> {
        let options = options_object(options, "options")?;
        self.client
            .post(&format!("{}/truncate", self.url()?), &options)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    async fn update_with(
        &self,
        mut payload: Object,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        payload.extend(options_object(options, "options")?);
        self.update(None, None, Some(Value::Object(payload))).await
    }

    fn single(key: &str, value: Value) -> Object {
        let mut payload = Object::new();
        payload.insert(key.to_string(), value);
        payload
    }

    /// Add members. `options` may carry e.g. `hide_history` or a `message`.
    pub async fn add_members(
        &self,
        user_ids: &[&str],
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.update_with(Self::single("add_members", json!(user_ids)), options)
            .await
    }

    /// Remove members.
    pub async fn remove_members(&self, user_ids: &[&str]) -> Result<StreamResponse> {
        self.update_with(Self::single("remove_members", json!(user_ids)), None)
            .await
    }

    /// Promote members to moderators.
    pub async fn add_moderators(&self, user_ids: &[&str]) -> Result<StreamResponse> {
        self.update_with(Self::single("add_moderators", json!(user_ids)), None)
            .await
    }

    /// Demote moderators back to members.
    pub async fn demote_moderators(&self, user_ids: &[&str]) -> Result<StreamResponse> {
        self.update_with(Self::single("demote_moderators", json!(user_ids)), None)
            .await
    }

    /// Assign channel roles to members.
    pub async fn assign_roles(&self, roles: &[ChannelMember]) -> Result<StreamResponse> {
        self.update_with(
            Self::single("assign_roles", serde_json::to_value(roles)?),
            None,
        )
        .await
    }

    /// Invite users, optionally with a system message.
    pub async fn invite_members(
        &self,
        user_ids: &[&str],
        message: Option<Value>,
    ) -> Result<StreamResponse> {
        let payload = Self::single("invites", json!(user_ids));
        self.update(None, message, Some(Value::Object(payload))).await
    }

    /// Accept a pending invite on behalf of `user_id`.
    pub async fn accept_invite(
        &mut self,
        user_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.answer_invite(user_id, "accept_invite", options).await
    }

    /// Reject a pending invite on behalf of `user_id`.
    pub async fn reject_invite(
        &mut self,
        user_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.answer_invite(user_id, "reject_invite", options).await
    }

    async fn answer_invite(
        &mut self,
        user_id: &str,
        flag: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut options = options_object(options, "options")?;
        options.insert("user_id".to_string(), json!(user_id));
        options.insert(flag.to_string(), Value::Bool(true));
        let response = self
            .update(None, None, Some(Value::Object(options)))
            .await?;
        if let Some(channel) = response["channel"].as_object() {
            self.custom_data = Value::Object(channel.clone());
        }
        Ok(response)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read state
    // ─────────────────────────────────────────────────────────────────────────

    /// Mark the channel read for `user_id`.
    pub async fn mark_read(&self, user_id: &str, data: Option<Value>) -> Result<StreamResponse> {
        let mut payload = options_object(data, "data")?;
        payload.insert("user".to_string(), user_ref(user_id));
        self.client
            .post(&format!("{}/read", self.url()?), &payload)
            .await
    }

    /// Send a delivery receipt for `user_id`.
    ///
    /// `data` may carry `channel_delivered_message` (cid → message id) and
    /// connection details. Requires delivery receipts enabled for the user.
    pub async fn mark_delivered(
        &self,
        user_id: &str,
        data: Option<Value>,
    ) -> Result<StreamResponse> {
        let mut payload = options_object(data, "data")?;
        payload.insert("user_id".to_string(), json!(user_id));
        self.client.post("channels/delivered", &payload).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Moderation
    // ─────────────────────────────────────────────────────────────────────────

    fn scoped(&self, options: Option<Value>) -> Result<Value> {
        let mut options = options_object(options, "options")?;
        options.insert("type".to_string(), json!(self.channel_type));
        options.insert("id".to_string(), json!(self.id));
        Ok(Value::Object(options))
    }

    /// Ban a user from this channel.
    pub async fn ban_user(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.client
            .moderation()
            .ban_user(target_id, Some(self.scoped(options)?))
            .await
    }

    /// Lift a channel ban.
    pub async fn unban_user(
        &self,
        target_id: &str,
        options: Option<Value>,
    ) -> Result<StreamResponse> {
        self.client
            .moderation()
            .unban_user(target_id, Some(self.scoped(options)?))
            .await
    }

    /// Mute the channel for `user_id`, optionally for `expiration_ms` milliseconds.
    pub async fn mute(&self, user_id: &str, expiration_ms: Option<u64>) -> Result<StreamResponse> {
        let mut payload = Object::new();
        payload.insert("user_id".to_string(), json!(user_id));
        payload.insert("channel_cid".to_string(), json!(self.cid()));
        if let Some(expiration) = expiration_ms {
            payload.insert("expiration".to_string(), json!(expiration));
        }
        self.client.post("moderation/mute/channel", &payload).await
    }

    /// Unmute the channel for `user_id`.
    pub async fn unmute(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .post(
                "moderation/unmute/channel",
                &json!({"user_id": user_id, "channel_cid": self.cid()}),
            )
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visibility
    // ─────────────────────────────────────────────────────────────────────────

    /// Hide the channel from `user_id`'s channel list.
    pub async fn hide(&self, user_id: &str, clear_history: bool) -> Result<StreamResponse> {
        self.client
            .post(
                &format!("{}/hide", self.url()?),
                &json!({"user_id": user_id, "clear_history": clear_history}),
            )
            .await
    }

    /// Show a previously hidden channel again.
    pub async fn show(&self, user_id: &str) -> Result<StreamResponse> {
        self.client
            .post(&format!("{}/show", self.url()?), &json!({"user_id": user_id}))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Files
    // ─────────────────────────────────────────────────────────────────────────

    /// Upload a file attachment.
    pub async fn send_file(
        &self,
        source: impl Into<FileSource>,
        name: &str,
        user: Value,
        content_type: Option<&str>,
    ) -> Result<StreamResponse> {
        self.client
            .send_file(&format!("{}/file", self.url()?), source, name, user, content_type)
            .await
    }

    /// Upload an image attachment.
    pub async fn send_image(
        &self,
        source: impl Into<FileSource>,
        name: &str,
        user: Value,
        content_type: Option<&str>,
    ) -> Result<StreamResponse> {
        self.client
            .send_file(&format!("{}/image", self.url()?), source, name, user, content_type)
            .await
    }

    /// Delete an uploaded file by its CDN url.
    pub async fn delete_file(&self, url: &str) -> Result<StreamResponse> {
        self.client
            .delete(
                &format!("{}/file", self.url()?),
                vec![("url".to_string(), url.to_string())],
            )
            .await
    }

    /// Delete an uploaded image by its CDN url.
    pub async fn delete_image(&self, url: &str) -> Result<StreamResponse> {
        self.client
            .delete(
                &format!("{}/image", self.url()?),
                vec![("url".to_string(), url.to_string())],
            )
            .await
    }
}
