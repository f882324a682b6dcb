//! Bounded fan-out over independent lookups
//!
//! Items are processed in fixed-size batches. Every lookup of a batch runs
//! concurrently and the next batch starts only once the whole batch has
//! settled. Results come back in request order.

use std::future::Future;

/// Default number of lookups in flight at once
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Run `lookup` for every item, `batch_size` at a time
///
/// Returns one result per item, index-aligned with `items`. A failing lookup
/// does not stop the others.
pub async fn settle_in_batches<'a, T, R, E, F, Fut>(
    items: &'a [T],
    batch_size: usize,
    lookup: F,
) -> Vec<Result<R, E>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let batch_size = batch_size.max(1);
    let mut settled = Vec::with_capacity(items.len());

    for (index, batch) in items.chunks(batch_size).enumerate() {
        tracing::trace!("Dispatching batch {} ({} lookups)", index, batch.len());
        let results = futures::future::join_all(batch.iter().map(&lookup)).await;
        settled.extend(results);
    }

    settled
}
