//! The canonical record produced for one scraped product page.
//!
//! ## Detail sources
//!
//! The same real-world attribute (brand, weight, ISBN, …) can surface in
//! zero, one, or several page regions, each with its own key spelling.
//! Rather than merging them at extraction time, the record keeps all four
//! regions verbatim and lets [`crate::resolve`] hunt across them in a fixed
//! priority order:
//!
//! 1. `details_table` — the "About this item" label/value table.
//! 2. `details_secondary` — the detail-bullets block, re-rendered as
//!    newline-delimited `label : value` text.
//! 3. `technical_details` — the general product-information table.
//! 4. `more_technical_details` — the extended tech-spec table.
//!
//! Mapping-typed sources are ordered `(label, value)` pairs so a scan sees
//! keys in page order. Every field defaults to empty — downstream code never
//! deals with an absent source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel emitted when the detail-bullets region yields no allow-listed
/// field.
pub const NO_SECONDARY_DETAILS: &str = "no additional details found";

/// Sentinel emitted when no variant-axis widget exists on the page.
pub const NO_VARIANT_INFO: &str = "no variant information";

/// Ordered label→value pairs scraped from one page region.
pub type DetailPairs = Vec<(String, String)>;

/// One detail source, borrowed from a [`ProductRecord`] for resolution.
#[derive(Debug, Clone, Copy)]
pub enum DetailSource<'a> {
    /// An ordered label→value mapping.
    Pairs(&'a [(String, String)]),
    /// A newline-delimited `label : value` text blob.
    Text(&'a str),
}

/// Everything extracted from a single product page.
///
/// A record is built once per extraction call and is immutable afterwards;
/// the export projection derives rows from it without mutating it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// The 10-character product identifier. Always present — a failed
    /// extraction yields the [`ProductRecord::error_fallback`] shape, never
    /// a partially-populated record.
    pub asin: String,
    pub source_url: String,

    /// First breadcrumb entry.
    pub category: String,
    /// Last breadcrumb entry.
    pub sub_category: String,

    pub title: String,
    /// Currency-formatted price string, e.g. `"$12.99"`.
    pub price: String,
    pub stock_status: String,
    pub ships_from: String,
    pub sold_by: String,
    pub primary_delivery_info: String,
    pub secondary_delivery_info: String,
    /// Free-text Prime indicator taken from the badge span; not a boolean.
    pub prime_badge: String,

    /// Feature-bullet text, one bullet per line.
    pub description: String,
    /// Book-page description expander content; empty for non-book listings.
    pub book_description: String,
    pub ingredients: String,

    pub details_table: DetailPairs,
    pub details_secondary: String,
    pub technical_details: DetailPairs,
    pub more_technical_details: DetailPairs,

    /// Normalized variant blob: `LABEL:`/`SELECTION:` pairs followed by
    /// `<Axis>: <value>` / `ASIN: <id>` option pairs, one axis after
    /// another. See [`crate::variants::parse_variants_text`].
    pub variants_text: String,

    /// Primary image URLs, first-seen order, no duplicates.
    pub main_images: Vec<String>,
    /// Variant ASIN → ordered, deduplicated hi-res image URLs.
    pub hi_res_images_by_asin: BTreeMap<String, Vec<String>>,
    /// ASIN the primary image block is attributed to; defaults to the
    /// record's own ASIN when the page does not say otherwise.
    pub main_image_asin: String,
}

impl ProductRecord {
    /// Returns the four detail sources in resolver priority order.
    #[must_use]
    pub fn detail_sources(&self) -> [DetailSource<'_>; 4] {
        [
            DetailSource::Pairs(&self.details_table),
            DetailSource::Text(&self.details_secondary),
            DetailSource::Pairs(&self.technical_details),
            DetailSource::Pairs(&self.more_technical_details),
        ]
    }

    /// Builds the degraded-but-renderable record returned when any fetch or
    /// parse step fails.
    ///
    /// Batch callers rely on receiving one record per input identifier, so
    /// the pipeline absorbs failures into this shape instead of propagating
    /// them. Every text field carries a uniform human-readable placeholder;
    /// mappings and image collections stay empty.
    #[must_use]
    pub fn error_fallback(asin: &str, source_url: &str) -> Self {
        Self {
            asin: asin.to_string(),
            source_url: source_url.to_string(),
            category: fetch_error("category"),
            sub_category: fetch_error("sub-category"),
            title: fetch_error("title"),
            price: fetch_error("price"),
            stock_status: fetch_error("stock status"),
            ships_from: fetch_error("ships from"),
            sold_by: fetch_error("sold by"),
            primary_delivery_info: fetch_error("primary delivery info"),
            secondary_delivery_info: fetch_error("secondary delivery info"),
            prime_badge: fetch_error("prime status"),
            description: fetch_error("description"),
            book_description: String::new(),
            ingredients: fetch_error("ingredients"),
            details_table: Vec::new(),
            details_secondary: fetch_error("additional product details"),
            technical_details: Vec::new(),
            more_technical_details: Vec::new(),
            variants_text: fetch_error("variants"),
            main_images: Vec::new(),
            hi_res_images_by_asin: BTreeMap::new(),
            main_image_asin: asin.to_string(),
        }
    }

    /// Returns `true` if this record is the error-fallback shape.
    #[must_use]
    pub fn is_error_fallback(&self) -> bool {
        self.title == fetch_error("title")
    }
}

fn fetch_error(field: &str) -> String {
    format!("an error occurred fetching {field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_fallback_keeps_identity() {
        let record = ProductRecord::error_fallback("B08N5WRWNW", "https://www.amazon.com/dp/B08N5WRWNW");
        assert_eq!(record.asin, "B08N5WRWNW");
        assert_eq!(record.main_image_asin, "B08N5WRWNW");
        assert_eq!(record.source_url, "https://www.amazon.com/dp/B08N5WRWNW");
    }

    #[test]
    fn error_fallback_uses_uniform_placeholders() {
        let record = ProductRecord::error_fallback("B08N5WRWNW", "");
        assert_eq!(record.stock_status, "an error occurred fetching stock status");
        assert_eq!(record.title, "an error occurred fetching title");
        assert!(record.is_error_fallback());
    }

    #[test]
    fn error_fallback_has_empty_image_collections() {
        let record = ProductRecord::error_fallback("B08N5WRWNW", "");
        assert!(record.main_images.is_empty());
        assert!(record.hi_res_images_by_asin.is_empty());
    }

    #[test]
    fn default_record_has_no_absent_sources() {
        let record = ProductRecord::default();
        assert!(record.details_table.is_empty());
        assert!(record.details_secondary.is_empty());
        assert!(record.technical_details.is_empty());
        assert!(record.more_technical_details.is_empty());
    }
}
