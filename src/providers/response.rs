use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap};
use serde::de::DeserializeOwned;

use crate::error::TetherError;

/// A fully-read 2xx response. Decoding is the caller's responsibility; the
/// executing client never assumes a response shape.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TetherError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Basecamp's pagination signal: a `Link` header means more pages exist.
    /// The header value itself is not parsed, because the provider numbers
    /// pages positionally.
    pub(crate) fn has_more_pages(&self) -> bool {
        self.headers.contains_key(header::LINK)
    }
}
