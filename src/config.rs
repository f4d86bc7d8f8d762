use std::sync::LazyLock;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Integration-layer configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// OAuth client id for the project-management provider.
    /// Env: `BASECAMP_CLIENT_ID`.
    #[serde(default)]
    pub basecamp_client_id: String,

    /// OAuth client secret for the project-management provider.
    /// Env: `BASECAMP_CLIENT_SECRET`.
    #[serde(default)]
    pub basecamp_client_secret: String,

    /// Long-lived OAuth refresh token. Required for the Basecamp client;
    /// its absence is a construction-time error, not a call-time one.
    /// Env: `BASECAMP_REFRESH_TOKEN`.
    #[serde(default)]
    pub basecamp_refresh_token: String,

    /// Account id segment of every Basecamp resource URL.
    /// Env: `BASECAMP_ACCOUNT_ID`.
    #[serde(default)]
    pub basecamp_account_id: String,

    /// Chatbot integration key, used to post campfire lines as the bot.
    /// Env: `BASECAMP_BOT_KEY`.
    #[serde(default)]
    pub basecamp_bot_key: String,

    /// Minimum delay between consecutive paginated Basecamp requests, in
    /// milliseconds. Env: `BASECAMP_PAGE_DELAY_MS`. Default: `0` (no pacing).
    #[serde(default)]
    pub basecamp_page_delay_ms: u64,

    /// Integration secret for the workspace/database provider.
    /// Env: `NOTION_SECRET`.
    #[serde(default)]
    pub notion_secret: String,

    /// Minimum delay between consecutive paginated Notion requests, in
    /// milliseconds. The provider allows roughly 3 requests per second.
    /// Env: `NOTION_PAGE_DELAY_MS`. Default: `350`.
    #[serde(default = "default_notion_page_delay_ms")]
    pub notion_page_delay_ms: u64,

    /// Per-request timeout for outbound HTTP, in seconds.
    /// Env: `HTTP_TIMEOUT_SECS`. Default: `30`.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            basecamp_client_id: String::new(),
            basecamp_client_secret: String::new(),
            basecamp_refresh_token: String::new(),
            basecamp_account_id: String::new(),
            basecamp_bot_key: String::new(),
            basecamp_page_delay_ms: 0,
            notion_secret: String::new(),
            notion_page_delay_ms: default_notion_page_delay_ms(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Config {
    /// Builds a Figment that merges defaults and environment variables.
    /// Uses raw env mapping, so field names map to env vars in
    /// UPPER_SNAKE_CASE.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw())
    }

    /// Loads configuration from the environment with defaults applied.
    pub fn from_env() -> Self {
        Self::figment()
            .extract()
            .expect("failed to extract configuration via Figment")
    }
}

fn default_notion_page_delay_ms() -> u64 {
    350
}

fn default_http_timeout_secs() -> u64 {
    30
}

/// Fixed production endpoints. Tests point the resolved configs elsewhere.
pub static BASECAMP_TOKEN_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://launchpad.37signals.com/authorization/token")
        .expect("valid launchpad token URL")
});

pub static BASECAMP_AUTHORIZATION_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://launchpad.37signals.com/authorization.json")
        .expect("valid launchpad authorization URL")
});

pub static BASECAMP_API_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://3.basecampapi.com").expect("valid Basecamp API URL"));

pub static NOTION_API_URL: LazyLock<Url> =
    LazyLock::new(|| Url::parse("https://api.notion.com").expect("valid Notion API URL"));

/// Pinned wire-format version sent on every Notion request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Basecamp endpoints and credentials with concrete URLs resolved, so tests
/// can substitute a local server.
#[derive(Debug, Clone)]
pub struct BasecampResolvedConfig {
    pub token_url: Url,
    pub authorization_url: Url,
    pub api_url: Url,
    pub account_id: String,
    pub bot_key: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub page_delay: Duration,
    pub http_timeout: Duration,
}

impl BasecampResolvedConfig {
    pub fn resolve(cfg: &Config) -> Self {
        Self {
            token_url: BASECAMP_TOKEN_URL.clone(),
            authorization_url: BASECAMP_AUTHORIZATION_URL.clone(),
            api_url: BASECAMP_API_URL.clone(),
            account_id: cfg.basecamp_account_id.clone(),
            bot_key: cfg.basecamp_bot_key.clone(),
            client_id: cfg.basecamp_client_id.clone(),
            client_secret: cfg.basecamp_client_secret.clone(),
            refresh_token: cfg.basecamp_refresh_token.clone(),
            page_delay: Duration::from_millis(cfg.basecamp_page_delay_ms),
            http_timeout: Duration::from_secs(cfg.http_timeout_secs),
        }
    }
}

/// Notion endpoint and credential, resolved the same way.
#[derive(Debug, Clone)]
pub struct NotionResolvedConfig {
    pub api_url: Url,
    pub secret: String,
    pub version: String,
    pub page_delay: Duration,
    pub http_timeout: Duration,
}

impl NotionResolvedConfig {
    pub fn resolve(cfg: &Config) -> Self {
        Self {
            api_url: NOTION_API_URL.clone(),
            secret: cfg.notion_secret.clone(),
            version: NOTION_VERSION.to_string(),
            page_delay: Duration::from_millis(cfg.notion_page_delay_ms),
            http_timeout: Duration::from_secs(cfg.http_timeout_secs),
        }
    }
}
