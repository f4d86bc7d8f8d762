use std::sync::Arc;

use reqwest::{Method, header};
use tracing::warn;
use url::Url;

use super::client::BasecampClient;
use super::models::CampfireLine;
use crate::error::{TetherError, body_preview};

/// Chat lines in project campfires, posted as the user or as the bot.
pub struct CampfireClient {
    client: Arc<BasecampClient>,
    http: reqwest::Client,
    bot_key: String,
}

impl CampfireClient {
    pub(crate) fn new(client: Arc<BasecampClient>, http: reqwest::Client, bot_key: String) -> Self {
        Self {
            client,
            http,
            bot_key,
        }
    }

    pub async fn create_line(
        &self,
        project_id: i64,
        campfire_id: i64,
        line: &str,
    ) -> Result<(), TetherError> {
        let url = self
            .client
            .bucket_url(project_id, &format!("chats/{campfire_id}/lines.json"))?;
        let body = serde_json::to_value(CampfireLine {
            content: line.to_owned(),
        })?;
        self.client.execute(Method::POST, url, Some(&body)).await?;
        Ok(())
    }

    /// Posts a line under the configured chatbot integration rather than
    /// the token's user.
    pub async fn bot_create_line(
        &self,
        project_id: i64,
        campfire_id: i64,
        line: &str,
    ) -> Result<(), TetherError> {
        let url = self.client.account_url(&format!(
            "integrations/{}/buckets/{project_id}/chats/{campfire_id}/lines.json",
            self.bot_key
        ))?;
        let body = serde_json::to_value(CampfireLine {
            content: line.to_owned(),
        })?;
        self.client.execute(Method::POST, url, Some(&body)).await?;
        Ok(())
    }

    /// Replies through the callback URL a chatbot mention delivers. The
    /// callback is pre-authorized, so no bearer token is attached.
    pub async fn bot_reply(&self, callback_url: Url, message: &str) -> Result<(), TetherError> {
        let response = self
            .http
            .post(callback_url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&CampfireLine {
                content: message.to_owned(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            warn!(%status, url = %callback_url, body = %body_preview(&body), "bot reply failed");
            return Err(TetherError::RemoteApi { status, body });
        }
        Ok(())
    }
}
