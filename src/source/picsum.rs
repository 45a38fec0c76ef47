// Lorem Picsum listing source
//
// Talks to the /v2/list endpoint. The response is a plain JSON array of
// photo entries; paging is entirely query-string driven (page starts at
// 1, limit caps at 100 server-side). Past the end of the catalog the
// endpoint returns an empty array, not an error - that empty page is the
// exhaustion signal the loader relies on.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::gallery::item::{decode_batch, Item};
use crate::source::ListingSource;

/// Default listing endpoint base.
pub const DEFAULT_API_URL: &str = "https://picsum.photos";

pub struct PicsumSource {
    client: reqwest::Client,
    base_url: String,
}

impl PicsumSource {
    /// Build a source over the given base URL (no trailing slash needed).
    pub fn new(base_url: &str) -> Result<Self> {
        // Request timeout so a dead network surfaces as a Failed phase
        // instead of an eternal spinner
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .pool_max_idle_per_host(2)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn list_url(&self, page: u32, limit: u32) -> String {
        format!("{}/v2/list?page={}&limit={}", self.base_url, page, limit)
    }
}

#[async_trait]
impl ListingSource for PicsumSource {
    fn name(&self) -> &str {
        "picsum"
    }

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Item>> {
        let url = self.list_url(page, limit);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("listing endpoint returned {status}");
        }

        let body = response
            .text()
            .await
            .context("failed to read listing response body")?;

        decode_batch(&body).with_context(|| format!("bad response from {url}"))
    }
}
