use std::sync::Arc;

use super::client::BasecampClient;
use super::models::{Comment, NewComment};
use crate::error::TetherError;
use crate::throttle::Throttle;

/// Comments hang off any recording (todo, message, document).
pub struct CommentClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl CommentClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    pub async fn all(&self, project_id: i64, recording_id: i64) -> Result<Vec<Comment>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("recordings/{recording_id}/comments.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn create(
        &self,
        project_id: i64,
        recording_id: i64,
        comment: &NewComment,
    ) -> Result<Comment, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("recordings/{recording_id}/comments.json"))?;
        self.client
            .post_json(url, &serde_json::to_value(comment)?)
            .await
    }
}
