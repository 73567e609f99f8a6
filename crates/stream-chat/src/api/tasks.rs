//! Tasks API.

use crate::client::{Query, StreamClient};
use crate::error::Result;
use crate::response::StreamResponse;

/// Tasks API client.
pub struct TasksApi {
    client: StreamClient,
}

impl TasksApi {
    pub(crate) fn new(client: StreamClient) -> Self {
        Self { client }
    }

    /// Status of an asynchronous task, e.g. a batch delete.
    pub async fn get(&self, id: &str) -> Result<StreamResponse> {
        self.client
            .get(&format!("tasks/{}", id), Query::new())
            .await
    }
}
