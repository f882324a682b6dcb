//! Cursor pagination

use crate::error::PlatformResult;
use crate::models::ListPage;
use std::collections::HashSet;
use std::future::Future;

/// Fetch pages until the cursor runs out, accumulating every item
///
/// `fetch_page` receives `None` for the first page and the previous page's
/// cursor afterwards. A cursor seen before ends the loop.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> PlatformResult<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = PlatformResult<ListPage<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut seen = HashSet::new();
    let mut pages = 0usize;

    loop {
        let page = fetch_page(cursor.clone()).await?;
        pages += 1;
        let next = page.next().map(str::to_string);
        items.extend(page.items);

        match next {
            Some(next) if !seen.insert(next.clone()) => {
                tracing::warn!("Upstream cursor cycled back to {}, stopping", next);
                break;
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::trace!("Collected {} items over {} pages", items.len(), pages);
    Ok(items)
}
