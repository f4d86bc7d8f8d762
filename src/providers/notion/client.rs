use reqwest::{Method, header};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::NotionResolvedConfig;
use crate::error::{TetherError, body_preview};
use crate::providers::ApiResponse;
use crate::throttle::Throttle;

/// Name of the provider's mandatory wire-format version header.
const VERSION_HEADER: &str = "Notion-Version";

/// Token-authenticated request execution against the Notion API.
///
/// Unlike the OAuth provider, auth here is a static integration secret, so
/// there is no token manager in front of this client. The page throttle is
/// owned here because every paginated call shares it.
pub struct NotionClient {
    http: reqwest::Client,
    api_url: Url,
    secret: String,
    version: String,
    pub(crate) throttle: Throttle,
}

impl NotionClient {
    pub fn new(cfg: &NotionResolvedConfig) -> Result<Self, TetherError> {
        let http = reqwest::Client::builder().timeout(cfg.http_timeout).build()?;
        Ok(Self {
            http,
            api_url: cfg.api_url.clone(),
            secret: cfg.secret.clone(),
            version: cfg.version.clone(),
            throttle: Throttle::every(cfg.page_delay),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, TetherError> {
        Ok(self.api_url.join(path)?)
    }

    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<ApiResponse, TetherError> {
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.secret))
            .header(VERSION_HEADER, &self.version)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "notion request");

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%status, %url, body = %body_preview(&body), "notion request failed");
            return Err(TetherError::RemoteApi { status, body });
        }

        Ok(ApiResponse {
            status,
            headers,
            body: bytes,
        })
    }
}
