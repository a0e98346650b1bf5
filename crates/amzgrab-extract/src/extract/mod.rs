//! Product-record assembly: one fetched page in, one [`ProductRecord`] out.

mod images;
mod sections;
mod variants;

use scraper::Html;

use amzgrab_core::ProductRecord;

use crate::client::ProxyClient;
use crate::error::ScrapeError;
use crate::ident::resolve_identifier;

/// Extracts one product record for an ASIN or product URL.
///
/// Input validation happens synchronously, before any network activity:
/// an empty credential, an empty identifier, or an identifier with no
/// recognizable ASIN is an [`ScrapeError::InvalidInput`] surfaced directly.
///
/// Past that boundary the call is total — every fetch or parse failure is
/// absorbed into [`ProductRecord::error_fallback`] so batch callers always
/// receive one record per input, never an error.
///
/// `niche_hint` is advisory; every detail source is extracted regardless,
/// so the hint only feeds diagnostics.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidInput`] only.
pub async fn extract_product(
    client: &ProxyClient,
    identifier: &str,
    niche_hint: Option<&str>,
    api_key: &str,
) -> Result<ProductRecord, ScrapeError> {
    if api_key.trim().is_empty() {
        return Err(ScrapeError::invalid_input("API key is empty"));
    }
    let (asin, source_url) = resolve_identifier(identifier)?;

    if let Some(niche) = niche_hint {
        tracing::debug!(%asin, niche, "extracting product");
    } else {
        tracing::debug!(%asin, "extracting product");
    }

    let markup = match client.fetch_markup(&source_url, api_key).await {
        Ok(markup) => markup,
        Err(err) => {
            tracing::warn!(%asin, error = %err, "fetch failed — returning error record");
            return Ok(ProductRecord::error_fallback(&asin, &source_url));
        }
    };

    match build_record(&markup, &asin, &source_url) {
        Ok(record) => Ok(record),
        Err(err) => {
            tracing::warn!(%asin, error = %err, "extraction failed — returning error record");
            Ok(ProductRecord::error_fallback(&asin, &source_url))
        }
    }
}

/// Builds a [`ProductRecord`] from raw page markup.
///
/// # Errors
///
/// Returns [`ScrapeError::MarkupStructure`] when the document carries no
/// recognizable product markup (bot interstitial, dead listing).
pub fn build_record(
    markup: &str,
    asin: &str,
    source_url: &str,
) -> Result<ProductRecord, ScrapeError> {
    let doc = Html::parse_document(markup);
    if !sections::has_product_markup(&doc) {
        return Err(ScrapeError::MarkupStructure {
            region: "product title",
        });
    }

    let scripts = sections::script_blobs(&doc);

    Ok(ProductRecord {
        asin: asin.to_string(),
        source_url: source_url.to_string(),
        category: sections::category(&doc),
        sub_category: sections::sub_category(&doc),
        title: sections::title(&doc),
        price: sections::price(&doc),
        stock_status: sections::stock_status(&doc),
        ships_from: sections::ships_from(&doc),
        sold_by: sections::sold_by(&doc),
        primary_delivery_info: sections::primary_delivery_info(&doc),
        secondary_delivery_info: sections::secondary_delivery_info(&doc),
        prime_badge: sections::prime_badge(&doc),
        description: sections::description(&doc),
        book_description: sections::book_description(&doc),
        ingredients: sections::ingredients(&doc),
        details_table: sections::details_table(&doc),
        details_secondary: sections::secondary_details(&doc),
        technical_details: sections::technical_details(&doc),
        more_technical_details: sections::more_technical_details(&doc),
        variants_text: variants::variants_text(&doc),
        main_images: images::main_images(&scripts),
        hi_res_images_by_asin: images::hi_res_images_by_asin(&scripts),
        main_image_asin: sections::main_image_asin(&doc).unwrap_or_else(|| asin.to_string()),
    })
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
