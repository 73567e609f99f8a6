//! Batch updates over all channels matching a filter.

use serde_json::Value;

use crate::client::StreamClient;
use crate::error::Result;
use crate::response::StreamResponse;
use crate::types::{BatchOperation, ChannelMember, ChannelsBatchRequest};

/// Applies one operation to every channel matched by a filter.
///
/// Runs asynchronously on the server; the response carries a task id that can
/// be polled with [`TasksApi::get`](crate::api::TasksApi::get).
pub struct ChannelBatchUpdater {
    client: StreamClient,
}

impl ChannelBatchUpdater {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    async fn members_op(
        &self,
        operation: BatchOperation,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        let mut request = ChannelsBatchRequest::new(operation, filter);
        request.members = Some(members);
        self.client.channels().update_batch(&request).await
    }

    async fn plain_op(&self, operation: BatchOperation, filter: Value) -> Result<StreamResponse> {
        let request = ChannelsBatchRequest::new(operation, filter);
        self.client.channels().update_batch(&request).await
    }

    async fn tags_op(
        &self,
        operation: BatchOperation,
        filter: Value,
        tags: Vec<String>,
    ) -> Result<StreamResponse> {
        let mut request = ChannelsBatchRequest::new(operation, filter);
        request.filter_tags_update = Some(tags);
        self.client.channels().update_batch(&request).await
    }

    // Members

    /// Add members to every matched channel.
    pub async fn add_members(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::AddMembers, filter, members)
            .await
    }

    /// Remove members from every matched channel.
    pub async fn remove_members(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::RemoveMembers, filter, members)
            .await
    }

    /// Invite users to every matched channel.
    pub async fn invite_members(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::Invites, filter, members)
            .await
    }

    /// Promote members to moderators.
    pub async fn add_moderators(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::AddModerators, filter, members)
            .await
    }

    /// Demote moderators back to members.
    pub async fn demote_moderators(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::DemoteModerators, filter, members)
            .await
    }

    /// Members carry the `channel_role` to assign.
    pub async fn assign_roles(
        &self,
        filter: Value,
        members: Vec<ChannelMember>,
    ) -> Result<StreamResponse> {
        self.members_op(BatchOperation::AssignRoles, filter, members)
            .await
    }

    // Visibility

    /// Hide the matched channels.
    pub async fn hide(&self, filter: Value) -> Result<StreamResponse> {
        self.plain_op(BatchOperation::Hide, filter).await
    }

    /// Show previously hidden channels.
    pub async fn show(&self, filter: Value) -> Result<StreamResponse> {
        self.plain_op(BatchOperation::Show, filter).await
    }

    /// Archive the matched channels.
    pub async fn archive(&self, filter: Value) -> Result<StreamResponse> {
        self.plain_op(BatchOperation::Archive, filter).await
    }

    /// Unarchive the matched channels.
    pub async fn unarchive(&self, filter: Value) -> Result<StreamResponse> {
        self.plain_op(BatchOperation::Unarchive, filter).await
    }

    // Data

    /// Set channel data fields on every matched channel.
    pub async fn update_data(&self, filter: Value, data: Value) -> Result<StreamResponse> {
        let mut request = ChannelsBatchRequest::new(BatchOperation::UpdateData, filter);
        request.data = Some(data);
        self.client.channels().update_batch(&request).await
    }

    /// Add filter tags to every matched channel.
    pub async fn add_filter_tags(
        &self,
        filter: Value,
        tags: Vec<String>,
    ) -> Result<StreamResponse> {
        self.tags_op(BatchOperation::AddFilterTags, filter, tags)
            .await
    }

    /// Remove filter tags from every matched channel.
    pub async fn remove_filter_tags(
        &self,
        filter: Value,
        tags: Vec<String>,
    ) -> Result<StreamResponse> {
        self.tags_op(BatchOperation::RemoveFilterTags, filter, tags)
            .await
    }
}
