use std::sync::Arc;

use super::client::BasecampClient;
use super::models::{NewScheduleEntry, ScheduleEntry};
use crate::error::TetherError;
use crate::throttle::Throttle;

pub struct ScheduleClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl ScheduleClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    /// Upcoming entries on a project schedule, across all pages.
    pub async fn entries(
        &self,
        project_id: i64,
        schedule_id: i64,
    ) -> Result<Vec<ScheduleEntry>, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("schedules/{schedule_id}/entries.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn create_entry(
        &self,
        project_id: i64,
        schedule_id: i64,
        entry: &NewScheduleEntry,
    ) -> Result<ScheduleEntry, TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("schedules/{schedule_id}/entries.json"))?;
        self.client.post_json(url, &serde_json::to_value(entry)?).await
    }
}
