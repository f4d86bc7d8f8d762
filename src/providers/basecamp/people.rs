use std::sync::Arc;

use tracing::info;

use super::client::BasecampClient;
use super::models::{AccessGranted, AccessUpdate, Person, UserInfo};
use crate::error::TetherError;
use crate::throttle::Throttle;

/// Account people and per-project access management.
pub struct PeopleClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl PeopleClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    pub async fn get(&self, person_id: i64) -> Result<Person, TetherError> {
        let url = self.client.account_url(&format!("people/{person_id}.json"))?;
        self.client.get_json(url).await
    }

    /// Identity behind the current access token, from the launchpad
    /// authorization endpoint rather than the account API.
    pub async fn authorization(&self) -> Result<UserInfo, TetherError> {
        self.client.get_json(self.client.authorization_url()).await
    }

    /// Everyone with access to a project, across all pages.
    pub async fn in_project(&self, project_id: i64) -> Result<Vec<Person>, TetherError> {
        let url = self
            .client
            .account_url(&format!("projects/{project_id}/people.json"))?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn update_access(
        &self,
        project_id: i64,
        update: &AccessUpdate,
    ) -> Result<AccessGranted, TetherError> {
        let url = self
            .client
            .account_url(&format!("projects/{project_id}/people/users.json"))?;
        let result: AccessGranted = self
            .client
            .put_json(url, &serde_json::to_value(update)?)
            .await?;
        info!(
            project_id,
            granted = result.granted.len(),
            revoked = result.revoked.len(),
            "updated project access"
        );
        Ok(result)
    }
}
