// Demo mode: a finite offline catalog to showcase the TUI
//
// Serves deterministic synthetic pages through the same ListingSource
// interface as the real endpoint, with a little latency so the spinner
// is visible and one scripted failure so the retry banner can be seen
// without unplugging the network. Page math matches the real thing:
// full pages until the catalog runs out, a short tail page, then the
// empty page that ends the session.
//
// Run with: PHOTOFALL_DEMO=1 photofall

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::time::sleep;

use crate::gallery::Item;
use crate::source::ListingSource;

/// Photographer names cycled through the synthetic catalog.
const AUTHORS: [&str; 8] = [
    "Alejandro Escamilla",
    "Paul Jarvis",
    "Aleks Dorohovich",
    "Shyamanta Baruah",
    "Steve Richey",
    "Austin Neill",
    "Tina Rataj",
    "Marcin Czerwinski",
];

/// A few plausible capture sizes so the cards don't all look alike.
const DIMENSIONS: [(u32, u32); 5] = [
    (5000, 3333),
    (2500, 1667),
    (4000, 3000),
    (3872, 2592),
    (2048, 1365),
];

pub struct DemoSource {
    /// Total entries in the synthetic catalog
    catalog_size: usize,
    /// Per-page artificial delay
    latency: Duration,
    /// Page that fails once, to demonstrate the retry flow
    flaky_page: Option<u32>,
    /// Set after the flaky page has failed; the retry then succeeds
    tripped: AtomicBool,
}

impl DemoSource {
    /// The showcase catalog: 100 entries, visible latency, one transient
    /// failure on page 3.
    pub fn new() -> Self {
        Self {
            catalog_size: 100,
            latency: Duration::from_millis(350),
            flaky_page: Some(3),
            tripped: AtomicBool::new(false),
        }
    }

    fn make_item(index: usize) -> Item {
        let (width, height) = DIMENSIONS[index % DIMENSIONS.len()];
        Item {
            id: index.to_string(),
            author: AUTHORS[index % AUTHORS.len()].to_string(),
            width,
            height,
            source_url: format!("https://unsplash.com/photos/demo-{index}"),
            download_url: format!("https://picsum.photos/id/{index}/{width}/{height}"),
        }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Item>> {
        sleep(self.latency).await;

        if self.flaky_page == Some(page) && !self.tripped.swap(true, Ordering::Relaxed) {
            bail!("simulated listing outage");
        }

        let start = (page.saturating_sub(1) as usize) * limit as usize;
        let end = (start + limit as usize).min(self.catalog_size);
        if start >= self.catalog_size {
            return Ok(Vec::new());
        }
        Ok((start..end).map(Self::make_item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_split_the_catalog() {
        let source = DemoSource {
            catalog_size: 100,
            latency: Duration::ZERO,
            flaky_page: None,
            tripped: AtomicBool::new(false),
        };

        let page1 = source.fetch_page(1, 30).await.unwrap();
        assert_eq!(page1.len(), 30);
        assert_eq!(page1[0].id, "0");
        assert_eq!(page1[29].id, "29");

        let page4 = source.fetch_page(4, 30).await.unwrap();
        assert_eq!(page4.len(), 10); // tail page

        let page5 = source.fetch_page(5, 30).await.unwrap();
        assert!(page5.is_empty()); // past the end
    }

    #[tokio::test]
    async fn test_flaky_page_fails_once_then_recovers() {
        let source = DemoSource {
            catalog_size: 100,
            latency: Duration::ZERO,
            flaky_page: Some(2),
            tripped: AtomicBool::new(false),
        };

        assert!(source.fetch_page(1, 30).await.is_ok());
        assert!(source.fetch_page(2, 30).await.is_err());
        // Same page again - the retry path
        let retried = source.fetch_page(2, 30).await.unwrap();
        assert_eq!(retried.len(), 30);
    }

    #[test]
    fn test_items_are_deterministic() {
        let a = DemoSource::make_item(7);
        let b = DemoSource::make_item(7);
        assert_eq!(a.id, b.id);
        assert_eq!(a.author, b.author);
        assert_eq!(a.download_url, b.download_url);
    }
}
