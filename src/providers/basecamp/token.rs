use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::config::BasecampResolvedConfig;
use crate::error::{AuthError, body_preview};

/// Tokens are treated as expired this many seconds early, so one cannot
/// lapse between the validity check and the outbound request.
const EXPIRY_SKEW_SECS: i64 = 30;

/// The cached credential: replaced wholesale on every successful refresh,
/// never partially updated.
#[derive(Debug, Clone)]
pub struct OauthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl OauthToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - ChronoDuration::seconds(EXPIRY_SKEW_SECS) > now
    }
}

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

struct TokenState {
    refresh_token: String,
    current: Option<OauthToken>,
}

/// Owns the OAuth client credentials and the cached access token for the
/// Basecamp launchpad.
///
/// The state mutex is held across the refresh await, which gives the
/// single-flight guarantee: when the cached token is expired, exactly one
/// caller performs the exchange and every concurrent caller waits for and
/// observes its result.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    state: Mutex<TokenState>,
}

impl TokenManager {
    /// A missing refresh token is a configuration mistake and fails here,
    /// not on the first call.
    pub fn new(cfg: &BasecampResolvedConfig, http: reqwest::Client) -> Result<Self, AuthError> {
        if cfg.refresh_token.trim().is_empty() {
            return Err(AuthError::MissingRefreshToken);
        }
        Ok(Self {
            http,
            token_url: cfg.token_url.clone(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            state: Mutex::new(TokenState {
                refresh_token: cfg.refresh_token.clone(),
                current: None,
            }),
        })
    }

    /// Returns a currently valid access token, refreshing first when none is
    /// cached or the cached one is at or past expiry.
    pub async fn bearer(&self) -> Result<String, AuthError> {
        let mut state = self.state.lock().await;

        if let Some(token) = state.current.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let fresh = self.exchange(&state.refresh_token).await?;
        state.refresh_token = fresh.refresh_token.clone();
        let access = fresh.access_token.clone();
        state.current = Some(fresh);
        Ok(access)
    }

    /// Snapshot of the cached token, if any. Mostly useful to callers that
    /// want to log expiry without forcing a refresh.
    pub async fn current_token(&self) -> Option<OauthToken> {
        self.state.lock().await.current.clone()
    }

    /// Refresh-token exchange against the launchpad. The endpoint takes its
    /// parameters in the query string, not an RFC 6749 form body.
    async fn exchange(&self, refresh_token: &str) -> Result<OauthToken, AuthError> {
        let mut url = self.token_url.clone();
        url.query_pairs_mut()
            .append_pair("type", "refresh")
            .append_pair("client_id", &self.client_id)
            .append_pair("client_secret", &self.client_secret)
            .append_pair("refresh_token", refresh_token);

        let response = self.http.post(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, body = %body_preview(&body), "token refresh rejected");
            return Err(AuthError::Status { status, body });
        }

        let parsed: TokenEndpointResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Decode {
                message: e.to_string(),
                body: body_preview(&body),
            })?;

        debug!(expires_in = parsed.expires_in, "access token refreshed");

        Ok(OauthToken {
            access_token: parsed.access_token,
            // The launchpad rotates refresh tokens; keep the old one when
            // the response omits a replacement.
            refresh_token: parsed
                .refresh_token
                .unwrap_or_else(|| refresh_token.to_string()),
            expires_at: Utc::now() + ChronoDuration::seconds(parsed.expires_in),
        })
    }
}
