use reqwest::Method;

use super::client::NotionClient;
use super::models::{DatabaseQuery, DatabaseQueryResponse, DatabaseRow};
use crate::error::TetherError;
use crate::paginate::{self, Page, PageCursor};

impl NotionClient {
    /// Fetches a single page of a database query.
    pub async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<DatabaseQueryResponse, TetherError> {
        let url = self.endpoint(&format!("v1/databases/{database_id}/query"))?;
        self.execute(Method::POST, url, Some(&serde_json::to_value(query)?))
            .await?
            .json()
    }

    /// Drains a database query across all pages, threading the provider's
    /// opaque cursor from each response into the next request.
    ///
    /// A response claiming more pages but carrying no cursor ends the drain
    /// rather than looping on page one.
    pub async fn query_database_all(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<DatabaseRow>, TetherError> {
        paginate::fetch_all(&self.throttle, |cursor| {
            let mut page_query = query.clone();
            if let Some(PageCursor::Token(token)) = cursor {
                page_query.start_cursor = Some(token);
            }
            async move {
                let response = self.query_database(database_id, &page_query).await?;
                let next = match (response.has_more, response.next_cursor) {
                    (true, Some(cursor)) => Some(PageCursor::Token(cursor)),
                    _ => None,
                };
                Ok(Page {
                    items: response.results,
                    next,
                })
            }
        })
        .await
    }
}
