use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;
use super::auth::AuthError;

#[derive(Debug, ThisError)]
pub enum TetherError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Non-2xx response from a resource endpoint. `body` is the raw
    /// response body, kept verbatim for caller diagnostics.
    #[error("remote API error with status {status}: {body}")]
    RemoteApi { status: StatusCode, body: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl TetherError {
    /// True when the underlying failure was a request deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TetherError::Transport(e) if e.is_timeout())
    }
}

impl IsRetryable for TetherError {
    fn is_retryable(&self) -> bool {
        match self {
            TetherError::Transport(_) => true,
            TetherError::RemoteApi { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            TetherError::Auth(e) => e.is_retryable(),
            TetherError::Decode(_) | TetherError::Url(_) => false,
        }
    }
}
