// Data model for entries of the picsum listing endpoint
//
// One element of the JSON array returned by /v2/list maps to one Item.
// We parse exactly the documented fields; Serde ignores anything extra,
// so additions on the API side don't break us.
//
// Decoding is per-element: a single malformed entry is skipped with a
// warning instead of poisoning the whole page. See decode_batch.

use anyhow::{Context, Result};
use serde::Deserialize;

/// One photo entry from the listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    /// Stable identifier, numeric string on the wire ("1047")
    pub id: String,
    /// Photographer credit, shown as the card headline
    pub author: String,
    /// Original capture width in pixels
    pub width: u32,
    /// Original capture height in pixels
    pub height: u32,
    /// Attribution page (unsplash), kept for a future open-in-browser action
    #[allow(dead_code)]
    #[serde(rename = "url")]
    pub source_url: String,
    /// Direct full-resolution image URL
    pub download_url: String,
}

impl Item {
    /// Entries must describe a real image; the endpoint has never served
    /// zero-area dimensions, so one showing up means the entry is garbage.
    fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// "5000×3333" - used in card rows and the detail line
    pub fn dimensions(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }
}

/// Decode one page body into items, skipping malformed elements.
///
/// The outer value must be a JSON array - anything else is a hard error
/// (the endpoint is not speaking its own protocol, nothing to salvage).
/// Within the array each element is decoded independently so one bad
/// entry costs us that entry, not the page.
pub fn decode_batch(body: &str) -> Result<Vec<Item>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(body).context("listing response is not a JSON array")?;

    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<Item>(value) {
            Ok(item) if item.is_well_formed() => items.push(item),
            Ok(item) => {
                tracing::warn!("skipping listing entry {index} (id {}): zero dimensions", item.id);
            }
            Err(err) => {
                tracing::warn!("skipping malformed listing entry {index}: {err}");
            }
        }
    }
    Ok(items)
}
