use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use super::client::BasecampClient;
use super::models::Recording;
use crate::error::TetherError;
use crate::throttle::Throttle;

/// Operations shared by every recording type.
pub struct RecordingClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl RecordingClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    /// Every recording of the given type (`Todo`, `Comment`, `Message`, ...)
    /// across all projects the token can see.
    pub async fn all_of_type(&self, recording_type: &str) -> Result<Vec<Recording>, TetherError> {
        let mut url = self.client.account_url("projects/recordings.json")?;
        url.query_pairs_mut().append_pair("type", recording_type);
        self.client.get_all(url, &self.throttle).await
    }

    /// Moves a recording to the trash. The provider purges trashed
    /// recordings after 30 days.
    pub async fn trash(&self, project_id: i64, recording_id: i64) -> Result<(), TetherError> {
        let url = self.client.bucket_url(
            project_id,
            &format!("recordings/{recording_id}/status/trashed.json"),
        )?;
        self.client.execute(Method::PUT, url, None).await?;
        info!(project_id, recording_id, "trashed recording");
        Ok(())
    }
}
