// Page loader - owns the accumulated gallery session state
//
// This is deliberately synchronous: it hands out page requests and accepts
// their outcomes, and the async shell (tui::app + source::spawn_fetch) does
// the actual I/O. Extracting it from App keeps the pagination rules unit
// testable without a runtime.
//
// Rules the loader enforces:
// 1. items only ever grows, and only by whole fetched batches in arrival
//    order - nothing reorders, dedupes or evicts.
// 2. page counts 1, 2, 3… and advances exactly once per appended batch,
//    so every page is requested at most once per session.
// 3. complete() is the only exit from Loading. The fetch task always sends
//    an outcome (see source::spawn_fetch), so a failed request can never
//    leave the session stuck "loading" - it lands in Failed instead, where
//    retry() re-requests the same page.

use anyhow::Result;

use crate::gallery::item::Item;
use crate::gallery::phase::{FetchPhase, PhaseEvent};

/// Batch size matching the upstream gallery's request size.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// A page request handed to a listing source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Entries per page
    pub limit: u32,
}

/// Result of one page fetch, reported back via complete().
#[derive(Debug)]
pub struct FetchOutcome {
    /// The page that was requested (for logging and staleness checks)
    pub page: u32,
    /// The fetched batch, or why the fetch failed
    pub result: Result<Vec<Item>>,
}

/// Accumulates fetched items and sequences page requests.
#[derive(Debug)]
pub struct PageLoader {
    items: Vec<Item>,
    /// Next page to request, 1-based
    page: u32,
    limit: u32,
    phase: FetchPhase,
}

impl PageLoader {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            limit,
            phase: FetchPhase::Idle,
        }
    }

    /// All items fetched so far, in arrival order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Next page that would be requested.
    pub fn next_page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    /// Start fetching the next page.
    ///
    /// Returns the request to run, or None when the session is loading,
    /// exhausted or failed. The phase machine is the guard; callers just
    /// pass a Some to the fetch task.
    pub fn begin(&mut self) -> Option<PageRequest> {
        if !self.phase.apply(PhaseEvent::FetchStarted) {
            return None;
        }
        Some(self.current_request())
    }

    /// Re-request the page that failed.
    ///
    /// Only valid in Failed; the page counter was not advanced by the
    /// failure, so this is the same request that just bounced.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if !self.phase.apply(PhaseEvent::RetryRequested) {
            return None;
        }
        Some(self.current_request())
    }

    /// Apply a fetch outcome. The single exit from Loading.
    ///
    /// Non-empty batch: append, advance the page counter, back to Idle.
    /// Empty batch: the catalog is done, Exhausted for good.
    /// Error: Failed with the rendered cause; items and page untouched.
    ///
    /// An outcome arriving in any other phase is stale (there is at most
    /// one request in flight, so this means the session moved on without
    /// it); it is logged and dropped without touching the items.
    pub fn complete(&mut self, outcome: FetchOutcome) {
        match outcome.result {
            Ok(batch) if batch.is_empty() => {
                if self.phase.apply(PhaseEvent::EmptyPage) {
                    tracing::info!(
                        "page {} is empty - end of catalog after {} items",
                        outcome.page,
                        self.items.len()
                    );
                } else {
                    self.log_stale(outcome.page);
                }
            }
            Ok(batch) => {
                if self.phase.apply(PhaseEvent::PageArrived) {
                    tracing::info!("page {} arrived with {} items", outcome.page, batch.len());
                    self.items.extend(batch);
                    self.page += 1;
                } else {
                    self.log_stale(outcome.page);
                }
            }
            Err(err) => {
                let error = format!("{err:#}");
                if self.phase.apply(PhaseEvent::FetchFailed(error.clone())) {
                    tracing::warn!("page {} failed: {error}", outcome.page);
                } else {
                    self.log_stale(outcome.page);
                }
            }
        }
    }

    fn current_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }

    fn log_stale(&self, page: u32) {
        tracing::warn!(
            "dropping stale outcome for page {page} (phase is {})",
            self.phase.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn batch(prefix: &str, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| Item {
                id: format!("{prefix}{i}"),
                author: format!("Author {prefix}{i}"),
                width: 4000,
                height: 3000,
                source_url: format!("https://unsplash.com/photos/{prefix}{i}"),
                download_url: format!("https://picsum.photos/id/{prefix}{i}/4000/3000"),
            })
            .collect()
    }

    fn ids(loader: &PageLoader) -> Vec<String> {
        loader.items().iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn test_begin_hands_out_page_one_first() {
        let mut loader = PageLoader::new(30);
        let request = loader.begin().unwrap();
        assert_eq!(request, PageRequest { page: 1, limit: 30 });
        assert!(loader.phase().is_loading());
    }

    #[test]
    fn test_append_preserves_existing_items() {
        let mut loader = PageLoader::new(3);

        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 1,
            result: Ok(batch("a", 3)),
        });
        let after_one = ids(&loader);

        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 2,
            result: Ok(batch("b", 3)),
        });
        let after_two = ids(&loader);

        // The older list is a strict prefix of the newer one
        assert_eq!(after_two.len(), 6);
        assert_eq!(&after_two[..3], &after_one[..]);
        assert_eq!(after_two[3], "b0");
    }

    #[test]
    fn test_page_advances_once_per_batch() {
        let mut loader = PageLoader::new(30);
        assert_eq!(loader.next_page(), 1);

        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 1,
            result: Ok(batch("a", 30)),
        });
        assert_eq!(loader.next_page(), 2);

        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 2,
            result: Ok(batch("b", 30)),
        });
        assert_eq!(loader.next_page(), 3);
    }

    #[test]
    fn test_begin_refused_while_loading() {
        let mut loader = PageLoader::new(30);
        assert!(loader.begin().is_some());
        // Second request while the first is in flight
        assert!(loader.begin().is_none());
        assert!(loader.phase().is_loading());
    }

    #[test]
    fn test_empty_page_is_terminal() {
        let mut loader = PageLoader::new(30);
        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 1,
            result: Ok(vec![]),
        });
        assert_eq!(*loader.phase(), FetchPhase::Exhausted);

        // No further requests, ever
        assert!(loader.begin().is_none());
        assert!(loader.retry().is_none());
        assert_eq!(loader.next_page(), 1);
        assert!(loader.items().is_empty());
    }

    #[test]
    fn test_failure_keeps_page_and_items() {
        let mut loader = PageLoader::new(3);
        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 1,
            result: Ok(batch("a", 3)),
        });

        loader.begin().unwrap();
        loader.complete(FetchOutcome {
            page: 2,
            result: Err(anyhow!("connection reset")),
        });

        assert_eq!(loader.phase().error(), Some("connection reset"));
        assert_eq!(loader.items().len(), 3); // nothing lost
        assert_eq!(loader.next_page(), 2); // nothing skipped

        // Scroll-driven begin is refused; only retry resumes
        assert!(loader.begin().is_none());
        let request = loader.retry().unwrap();
        assert_eq!(request.page, 2);

        loader.complete(FetchOutcome {
            page: 2,
            result: Ok(batch("b", 3)),
        });
        assert!(loader.phase().is_idle());
        assert_eq!(loader.items().len(), 6);
        assert_eq!(loader.next_page(), 3);
    }

    #[test]
    fn test_error_chain_is_rendered_into_the_phase() {
        let mut loader = PageLoader::new(30);
        loader.begin().unwrap();
        let err = anyhow!("timed out").context("request to https://example.test failed");
        loader.complete(FetchOutcome {
            page: 1,
            result: Err(err),
        });
        let text = loader.phase().error().unwrap();
        assert!(text.contains("request to https://example.test failed"));
        assert!(text.contains("timed out"));
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut loader = PageLoader::new(30);
        // No begin() - nothing is in flight, so any outcome is stale
        loader.complete(FetchOutcome {
            page: 9,
            result: Ok(batch("x", 5)),
        });
        assert!(loader.items().is_empty());
        assert_eq!(loader.next_page(), 1);
        assert!(loader.phase().is_idle());
    }
}
