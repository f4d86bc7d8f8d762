use std::sync::Arc;

use reqwest::{Method, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::token::TokenManager;
use crate::config::BasecampResolvedConfig;
use crate::error::{TetherError, body_preview};
use crate::paginate::{self, Page, PageCursor};
use crate::providers::ApiResponse;
use crate::throttle::Throttle;

/// Bearer-authenticated request execution against the Basecamp API.
///
/// Obtains a valid access token from the [`TokenManager`] before every call,
/// treats any non-2xx status as a remote API error with the body preserved,
/// and leaves response decoding to the caller.
pub struct BasecampClient {
    http: reqwest::Client,
    tokens: Arc<TokenManager>,
    api_url: Url,
    authorization_url: Url,
    account_id: String,
}

impl BasecampClient {
    pub fn new(
        cfg: &BasecampResolvedConfig,
        tokens: Arc<TokenManager>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            tokens,
            api_url: cfg.api_url.clone(),
            authorization_url: cfg.authorization_url.clone(),
            account_id: cfg.account_id.clone(),
        }
    }

    /// Project-scoped resource URL:
    /// `<api>/<account-id>/buckets/<project-id>/<path>`.
    pub(crate) fn bucket_url(&self, project_id: i64, path: &str) -> Result<Url, TetherError> {
        let joined = self
            .api_url
            .join(&format!("{}/buckets/{project_id}/{path}", self.account_id))?;
        Ok(joined)
    }

    /// Account-scoped resource URL: `<api>/<account-id>/<path>`.
    pub(crate) fn account_url(&self, path: &str) -> Result<Url, TetherError> {
        let joined = self.api_url.join(&format!("{}/{path}", self.account_id))?;
        Ok(joined)
    }

    pub(crate) fn authorization_url(&self) -> Url {
        self.authorization_url.clone()
    }

    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<ApiResponse, TetherError> {
        let token = self.tokens.bearer().await?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, "basecamp request");

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            warn!(%status, %url, body = %body_preview(&body), "basecamp request failed");
            return Err(TetherError::RemoteApi { status, body });
        }

        Ok(ApiResponse {
            status,
            headers,
            body: bytes,
        })
    }

    pub(crate) async fn get(&self, url: Url) -> Result<ApiResponse, TetherError> {
        self.execute(Method::GET, url, None).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TetherError> {
        self.get(url).await?.json()
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &Value,
    ) -> Result<T, TetherError> {
        self.execute(Method::POST, url, Some(body)).await?.json()
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &Value,
    ) -> Result<T, TetherError> {
        self.execute(Method::PUT, url, Some(body)).await?.json()
    }

    /// Drains a `Link`-header-paginated listing. The provider numbers pages
    /// positionally: page one is the bare URL, later pages append `page=<n>`.
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        first_url: Url,
        throttle: &Throttle,
    ) -> Result<Vec<T>, TetherError> {
        paginate::fetch_all(throttle, |cursor| {
            let (url, next_page) = match cursor {
                Some(PageCursor::Page(n)) => (with_page(&first_url, n), n + 1),
                _ => (first_url.clone(), 2),
            };
            async move {
                let response = self.get(url).await?;
                let items = response.json::<Vec<T>>()?;
                let next = response
                    .has_more_pages()
                    .then_some(PageCursor::Page(next_page));
                Ok(Page { items, next })
            }
        })
        .await
    }
}

/// Same URL with `page=<n>` appended, via `?` or `&` as the existing query
/// string requires.
fn with_page(url: &Url, page: u32) -> Url {
    let mut next = url.clone();
    next.query_pairs_mut().append_pair("page", &page.to_string());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_page_starts_a_query_string() {
        let url = Url::parse("https://api.test/1/buckets/2/todos.json").unwrap();
        assert_eq!(
            with_page(&url, 2).as_str(),
            "https://api.test/1/buckets/2/todos.json?page=2"
        );
    }

    #[test]
    fn with_page_extends_an_existing_query_string() {
        let url = Url::parse("https://api.test/1/recordings.json?type=Todo").unwrap();
        assert_eq!(
            with_page(&url, 3).as_str(),
            "https://api.test/1/recordings.json?type=Todo&page=3"
        );
    }
}
