//! Section extractors: each converts one region of the parsed page into a
//! scalar, an ordered label→value mapping, or a `label : value` text blob.
//!
//! Selectors follow the marketplace's stable element ids where they exist
//! (`#productTitle`, `#detailBulletsWrapper_feature_div`, …) and fall back
//! to class-based anchors elsewhere. A missing region always yields an empty
//! value, never an error — absence is normal on this kind of page.

use scraper::{ElementRef, Html, Selector};

use amzgrab_core::record::DetailPairs;
use amzgrab_core::NO_SECONDARY_DETAILS;

/// Field names accepted from the detail-bullets region, checked as
/// case-sensitive prefixes in this order. First match wins per item.
const SECONDARY_DETAIL_FIELDS: &[&str] = &[
    "Package Dimensions",
    "Product Dimensions",
    "Item model number",
    "UPC",
    "Manufacturer",
    "ASIN",
    "Country of Origin",
    "Publisher",
    "Language",
    "Paperback",
    "Hardcover",
    "ISBN-10",
    "ISBN-13",
    "Dimensions",
    "Item Weight",
    "Weight",
];

pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(doc: &Html, css: &str) -> String {
    doc.select(&sel(css)).next().map(element_text).unwrap_or_default()
}

/// Returns `true` when the document carries recognizable product markup.
/// A proxy error page or bot interstitial has no product title element.
pub(crate) fn has_product_markup(doc: &Html) -> bool {
    doc.select(&sel("#productTitle")).next().is_some()
}

pub(crate) fn title(doc: &Html) -> String {
    first_text(doc, "#productTitle")
}

pub(crate) fn price(doc: &Html) -> String {
    first_text(doc, "#corePrice_feature_div .a-offscreen")
}

pub(crate) fn primary_delivery_info(doc: &Html) -> String {
    first_text(
        doc,
        "#mir-layout-DELIVERY_BLOCK-slot-PRIMARY_DELIVERY_MESSAGE_LARGE .a-text-bold",
    )
}

pub(crate) fn secondary_delivery_info(doc: &Html) -> String {
    first_text(
        doc,
        "#mir-layout-DELIVERY_BLOCK-slot-SECONDARY_DELIVERY_MESSAGE_LARGE .a-text-bold",
    )
}

/// The Prime badge is only identifiable by its inline brand color.
pub(crate) fn prime_badge(doc: &Html) -> String {
    first_text(doc, r#"span[style*="color:#0064F9"]"#)
}

pub(crate) fn stock_status(doc: &Html) -> String {
    first_text(
        doc,
        "#availabilityInsideBuyBox_feature_div #availability .a-size-medium.a-color-success",
    )
}

pub(crate) fn ships_from(doc: &Html) -> String {
    offer_row(doc, 0)
}

pub(crate) fn sold_by(doc: &Html) -> String {
    offer_row(doc, 1)
}

fn offer_row(doc: &Html, index: usize) -> String {
    doc.select(&sel(".offer-display-feature-text.a-spacing-none"))
        .nth(index)
        .and_then(|row| row.select(&sel("span")).next())
        .map(element_text)
        .unwrap_or_default()
}

pub(crate) fn category(doc: &Html) -> String {
    first_text(
        doc,
        "#wayfinding-breadcrumbs_feature_div .a-unordered-list li:first-child a",
    )
}

pub(crate) fn sub_category(doc: &Html) -> String {
    first_text(
        doc,
        "#wayfinding-breadcrumbs_feature_div .a-unordered-list li:last-child a",
    )
}

/// Feature-bullet description, one bullet per line.
pub(crate) fn description(doc: &Html) -> String {
    let lines: Vec<String> = doc
        .select(&sel("#feature-bullets li"))
        .filter_map(|li| li.select(&sel("span")).next().map(element_text))
        .filter(|line| !line.is_empty())
        .collect();
    lines.join("\n")
}

pub(crate) fn book_description(doc: &Html) -> String {
    let parts: Vec<String> = doc
        .select(&sel("#bookDescription_feature_div .a-expander-content"))
        .map(element_text)
        .filter(|part| !part.is_empty())
        .collect();
    parts.join("\n")
}

/// Ingredients come from a dedicated block when present, else from the
/// important-information section whose bold label or heading reads
/// `Ingredients`.
pub(crate) fn ingredients(doc: &Html) -> String {
    if let Some(block) = doc.select(&sel("#nic-ingredients-content")).next() {
        return block
            .select(&sel("span"))
            .next()
            .map(element_text)
            .unwrap_or_default();
    }

    for section in doc.select(&sel("#important-information .a-section.content")) {
        let bold = section
            .select(&sel("span.a-text-bold"))
            .next()
            .map(element_text)
            .unwrap_or_default();
        let heading = section
            .select(&sel("h1, h2, h3, h4, h5, h6"))
            .next()
            .map(element_text)
            .unwrap_or_default();
        if bold != "Ingredients" && heading != "Ingredients" {
            continue;
        }

        let paragraphs: Vec<String> = section
            .select(&sel("p"))
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect();
        if !paragraphs.is_empty() {
            return paragraphs.join("\n");
        }
        // No paragraph markup; take the section's own text nodes.
        return own_text(section);
    }

    String::new()
}

fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(text.text.to_string()),
            _ => None,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// The "About this item" label/value table.
pub(crate) fn details_table(doc: &Html) -> DetailPairs {
    let mut pairs = DetailPairs::new();
    for table in doc.select(&sel("table.a-normal.a-spacing-micro")) {
        for row in table.select(&sel("tr")) {
            let key = row
                .select(&sel("td.a-span3 span.a-text-bold"))
                .next()
                .map(element_text)
                .unwrap_or_default();
            let value = row
                .select(&sel("td.a-span9 span.a-size-base"))
                .next()
                .map(element_text)
                .unwrap_or_default();
            if !key.is_empty() && !value.is_empty() {
                pairs.push((key, value));
            }
        }
    }
    pairs
}

/// The detail-bullets block, filtered through the field allow-list and
/// re-rendered as `label : value` lines.
pub(crate) fn secondary_details(doc: &Html) -> String {
    let Some(wrapper) = doc.select(&sel("#detailBulletsWrapper_feature_div")).next() else {
        return NO_SECONDARY_DETAILS.to_string();
    };

    let mut seen: Vec<&str> = Vec::new();
    let mut out = String::new();
    for region in wrapper.select(&sel("ul.a-unordered-list, div.a-section")) {
        for item in region.select(&sel("li, div")) {
            let text = item
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            for &field in SECONDARY_DETAIL_FIELDS {
                if !text.starts_with(field) || seen.contains(&field) {
                    continue;
                }
                let (label, value) = text.split_once(':').unwrap_or((text.as_str(), ""));
                out.push_str(&format!("{} : {}\n", label.trim(), value.trim()));
                seen.push(field);
                break;
            }
        }
    }

    let out = out.trim_end().to_string();
    if out.is_empty() {
        NO_SECONDARY_DETAILS.to_string()
    } else {
        out
    }
}

/// General product-information table.
pub(crate) fn technical_details(doc: &Html) -> DetailPairs {
    header_value_rows(doc, "#productDetails_feature_div table")
}

/// Extended tech-spec table.
pub(crate) fn more_technical_details(doc: &Html) -> DetailPairs {
    header_value_rows(doc, "#productDetails_techSpec_section_1")
}

fn header_value_rows(doc: &Html, css: &str) -> DetailPairs {
    let mut pairs = DetailPairs::new();
    for region in doc.select(&sel(css)) {
        for row in region.select(&sel("tr")) {
            let key = row.select(&sel("th")).next().map(element_text).unwrap_or_default();
            let value = row.select(&sel("td")).next().map(element_text).unwrap_or_default();
            if !key.is_empty() && !value.is_empty() {
                pairs.push((key, strip_leading_marks(&value)));
            }
        }
    }
    pairs
}

/// Cell values frequently lead with bidirectional text marks.
fn strip_leading_marks(value: &str) -> String {
    value
        .trim_start_matches(|c: char| c.is_whitespace() || c == '\u{200e}' || c == '\u{200f}')
        .to_string()
}

/// ASIN the primary image block is attributed to, when the page carries it.
pub(crate) fn main_image_asin(doc: &Html) -> Option<String> {
    doc.select(&sel("#imageBlock_feature_div"))
        .next()
        .and_then(|el| el.value().attr("data-csa-c-asin"))
        .map(str::to_string)
        .filter(|asin| !asin.is_empty())
}

/// Inner content of every `<script>` element, in document order.
pub(crate) fn script_blobs(doc: &Html) -> Vec<String> {
    doc.select(&sel("script"))
        .map(|script| script.text().collect::<String>())
        .collect()
}
