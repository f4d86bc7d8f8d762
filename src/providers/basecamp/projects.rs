use std::sync::Arc;

use super::client::BasecampClient;
use super::models::Project;
use crate::error::TetherError;
use crate::throttle::Throttle;

pub struct ProjectClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl ProjectClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    /// Every active project visible to the token, across all pages.
    pub async fn all(&self) -> Result<Vec<Project>, TetherError> {
        let url = self.client.account_url("projects.json")?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn get(&self, project_id: i64) -> Result<Project, TetherError> {
        let url = self.client.account_url(&format!("projects/{project_id}.json"))?;
        self.client.get_json(url).await
    }
}
