// Listing sources - where gallery pages come from
//
// A source answers "give me page N" and nothing else; pagination policy
// lives in gallery::PageLoader. Sources are trait objects so the TUI can
// run against the real endpoint or the offline demo catalog without
// caring which.
//
// spawn_fetch is the only place a request actually runs. Its contract is
// the important part: the outcome channel send happens unconditionally,
// success or failure, so the loader's Loading phase is always released.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::gallery::{FetchOutcome, Item, PageRequest};

pub mod demo;
pub mod picsum;

pub use demo::DemoSource;
pub use picsum::PicsumSource;

/// A paginated catalog of gallery items.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Short label for the status bar ("picsum", "demo")
    fn name(&self) -> &str;

    /// Fetch one page. An empty Vec means the catalog is exhausted.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Item>>;
}

/// Run one page request in the background.
///
/// The spawned task's entire job is fetch-then-report. Failures are
/// reported through the same channel as successes - there is no path that
/// skips the send, which is what guarantees the session can't get stuck
/// loading. If the receiver is gone (TUI torn down mid-flight) the result
/// has nowhere to go and is dropped, which is exactly what we want for a
/// dead session.
pub fn spawn_fetch(
    source: Arc<dyn ListingSource>,
    request: PageRequest,
    outcome_tx: mpsc::Sender<FetchOutcome>,
) {
    tokio::spawn(async move {
        tracing::debug!(
            "fetching page {} (limit {}) from {}",
            request.page,
            request.limit,
            source.name()
        );
        let result = source.fetch_page(request.page, request.limit).await;
        let _ = outcome_tx
            .send(FetchOutcome {
                page: request.page,
                result,
            })
            .await;
    });
}
