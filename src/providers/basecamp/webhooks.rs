use std::sync::Arc;

use reqwest::Method;
use tracing::info;

use super::client::BasecampClient;
use super::models::{NewWebhook, Webhook};
use crate::error::TetherError;
use crate::throttle::Throttle;

pub struct WebhookClient {
    client: Arc<BasecampClient>,
    throttle: Arc<Throttle>,
}

impl WebhookClient {
    pub(crate) fn new(client: Arc<BasecampClient>, throttle: Arc<Throttle>) -> Self {
        Self { client, throttle }
    }

    pub async fn all(&self, project_id: i64) -> Result<Vec<Webhook>, TetherError> {
        let url = self.client.bucket_url(project_id, "webhooks.json")?;
        self.client.get_all(url, &self.throttle).await
    }

    pub async fn create(
        &self,
        project_id: i64,
        webhook: &NewWebhook,
    ) -> Result<Webhook, TetherError> {
        let url = self.client.bucket_url(project_id, "webhooks.json")?;
        let created: Webhook = self
            .client
            .post_json(url, &serde_json::to_value(webhook)?)
            .await?;
        info!(project_id, webhook_id = created.id, "created webhook");
        Ok(created)
    }

    pub async fn delete(&self, project_id: i64, webhook_id: i64) -> Result<(), TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("webhooks/{webhook_id}.json"))?;
        self.client.execute(Method::DELETE, url, None).await?;
        Ok(())
    }
}
