use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;

/// Failures of the refresh-token exchange itself. Resource calls never
/// produce these; a 401 from a resource endpoint stays a remote API error.
#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("refresh token is not configured")]
    MissingRefreshToken,

    #[error("token refresh request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("token endpoint response did not parse: {message}. Body: {body}")]
    Decode { message: String, body: String },
}

impl IsRetryable for AuthError {
    fn is_retryable(&self) -> bool {
        match self {
            AuthError::Transport(_) => true,
            AuthError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            AuthError::MissingRefreshToken | AuthError::Decode { .. } => false,
        }
    }
}
