use std::sync::Arc;

use super::client::BasecampClient;
use super::models::{Message, NewMessage};
use crate::error::TetherError;
use crate::throttle::Throttle;

pub struct MessageClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl MessageClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    pub async fn get(&self, project_id: i64, message_id: i64) -> Result<Message, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("messages/{message_id}.json"))?;
        self.client.get_json(url).await
    }

    /// Every message on a board, across all pages.
    pub async fn all_on_board(
        &self,
        project_id: i64,
        board_id: i64,
    ) -> Result<Vec<Message>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("message_boards/{board_id}/messages.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn create(
        &self,
        project_id: i64,
        board_id: i64,
        message: &NewMessage,
    ) -> Result<Message, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("message_boards/{board_id}/messages.json"))?;
        self.client
            .post_json(url, &serde_json::to_value(message)?)
            .await
    }
}
