use std::future::Future;

use crate::error::TetherError;
use crate::throttle::Throttle;

/// Continuation between two pages of one traversal.
///
/// Produced by decoding one page, consumed by the next fetch, never
/// persisted. The two variants cover the two pagination idioms in use:
/// positional page numbers signalled by a `Link` response header, and opaque
/// cursor tokens embedded in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    Page(u32),
    Token(String),
}

/// One decoded page: its items plus the continuation, if any.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<PageCursor>,
}

/// Drains every page of a listing into one collection.
///
/// `fetch_page` receives `None` for the first page and the previous page's
/// continuation afterwards; it issues the request and decodes the response.
/// Items are appended strictly in server-returned page order. Any page error
/// aborts the whole traversal: the result is all pages or none.
///
/// The throttle is acquired before every request, so traversals sharing a
/// provider throttle are paced as one stream of requests.
pub async fn fetch_all<T, F, Fut>(throttle: &Throttle, mut fetch_page: F) -> Result<Vec<T>, TetherError>
where
    F: FnMut(Option<PageCursor>) -> Fut,
    Fut: Future<Output = Result<Page<T>, TetherError>>,
{
    let mut collected = Vec::new();
    let mut cursor = None;

    loop {
        throttle.acquire().await;
        let page = fetch_page(cursor.take()).await?;
        collected.extend(page.items);
        match page.next {
            None => return Ok(collected),
            next => cursor = next,
        }
    }
}
