//! Bounded-concurrency fan-out.
//!
//! Aggregate views are built from one listing call followed by one detail
//! call per listed identifier. [`BoundedFetcher`] runs those detail calls
//! concurrently, never more than its ceiling at once, and assembles the
//! results once the whole batch is done.

use futures::{StreamExt, TryStreamExt, stream};
use rtscope_core::Result;
use std::collections::BTreeMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::debug;

/// Runs per-identifier fetches with a hard concurrency ceiling.
#[derive(Debug, Clone, Copy)]
pub struct BoundedFetcher {
    concurrency: NonZeroUsize,
}

impl BoundedFetcher {
    /// Create a fetcher running at most `concurrency` fetches at once.
    ///
    /// A ceiling of zero is treated as one.
    #[must_use]
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: NonZeroUsize::new(concurrency).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// Concurrency ceiling.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    /// Fetch every identifier and return the results in completion order.
    ///
    /// The first failure aborts the batch: fetches still in flight are
    /// dropped and the error is returned. No partial result escapes.
    ///
    /// # Errors
    /// Returns the first error produced by `fetch`.
    pub async fn fetch_list<I, T, F, Fut>(&self, ids: I, fetch: F) -> Result<Vec<T>>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let ids = ids.into_iter();
        debug!(
            pending = ids.size_hint().0,
            workers = self.concurrency.get(),
            "fan-out starting"
        );

        let results: Vec<T> = stream::iter(ids)
            .map(fetch)
            .buffer_unordered(self.concurrency.get())
            .try_collect()
            .await
            .inspect_err(|e| debug!(error = %e, "fan-out aborted"))?;

        debug!(
            fetched = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fan-out complete"
        );
        Ok(results)
    }

    /// Fetch every identifier and index the results by `key`.
    ///
    /// When two results share a key the one completing last is kept.
    ///
    /// # Errors
    /// Returns the first error produced by `fetch`.
    pub async fn fetch_all<I, K, T, F, Fut, KF>(
        &self,
        ids: I,
        fetch: F,
        key: KF,
    ) -> Result<BTreeMap<K, T>>
    where
        I: IntoIterator,
        K: Ord,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Result<T>>,
        KF: Fn(&T) -> K,
    {
        let items = self.fetch_list(ids, fetch).await?;
        Ok(items.into_iter().map(|item| (key(&item), item)).collect())
    }
}
