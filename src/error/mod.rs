mod auth;
mod tether;

pub use auth::AuthError;
pub use tether::TetherError;

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

/// Truncate a response body for error messages and logs. Full bodies are
/// preserved only on the error variants that carry them verbatim.
pub(crate) fn body_preview(body: &str) -> String {
    body.char_indices()
        .nth(200)
        .map(|(idx, _)| format!("{}...<truncated>", &body[..idx]))
        .unwrap_or_else(|| body.to_string())
}
