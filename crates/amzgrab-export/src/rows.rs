//! Projection of product records into a flat tabular row set.
//!
//! The projection is pure: it reads records and derives rows, re-running the
//! shared field resolver against each record's detail sources for the
//! attribute columns. Records are never mutated.
//!
//! Row layout per record: one main row with every column populated, then one
//! extra row per variant ASIN discovered in the variant blob, carrying only
//! that ASIN and its image URLs.

use amzgrab_core::resolve::{
    extract_weight, not_found_marker, resolve_attribute, resolve_or_marker, spec_for,
    split_dimensions,
};
use amzgrab_core::{parse_variants_text, ProductRecord, VariantSelections};

/// Fixed column order ahead of the per-batch `Image N` columns.
pub const BASE_HEADERS: &[&str] = &[
    "Category",
    "Sub-category",
    "ASIN",
    "Title",
    "Link",
    "Price",
    "Flavor Name",
    "Size",
    "Color",
    "Style",
    "Unknown",
    "Price Listing",
    "Free Deli Day",
    "Prime Deli Day",
    "Is Prime",
    "Stock Status",
    "Ships From",
    "Sold By",
    "Description",
    "UPC",
    "Brand",
    "Manufacturer",
    "Ingredients",
    "Weight",
    "Length",
    "Width",
    "Height",
    "Item Form",
    "Product Benefits",
    "Scent",
    "Material Type",
    "Skin Type",
    "Item Volume",
    "Age Range",
    "Special Feature",
    "Publisher",
    "Language",
    "Paperback",
    "Hardcover",
    "ISBN-10",
    "ISBN-13",
];

/// The largest image count observed across the batch: main image galleries
/// and every per-variant list all compete for the column budget.
#[must_use]
pub fn max_image_count(records: &[ProductRecord]) -> usize {
    records
        .iter()
        .flat_map(|record| {
            std::iter::once(record.main_images.len())
                .chain(record.hi_res_images_by_asin.values().map(Vec::len))
        })
        .max()
        .unwrap_or(0)
}

/// The full header row for a batch with `max_images` image columns.
#[must_use]
pub fn headers(max_images: usize) -> Vec<String> {
    let mut headers: Vec<String> = BASE_HEADERS.iter().map(ToString::to_string).collect();
    for i in 1..=max_images {
        headers.push(format!("Image {i}"));
    }
    headers
}

/// Projects a batch of records into data rows (main rows plus variant rows),
/// sized for [`max_image_count`] image columns.
#[must_use]
pub fn project(records: &[ProductRecord]) -> Vec<Vec<String>> {
    let max_images = max_image_count(records);
    let mut rows = Vec::new();
    for record in records {
        rows.push(main_row(record, max_images));
        rows.extend(variant_rows(record, max_images));
    }
    rows
}

fn main_row(record: &ProductRecord, max_images: usize) -> Vec<String> {
    let selections = parse_variants_text(&record.variants_text);
    let dimensions = resolve_attribute(record, spec_for("Dimensions").expect("known attribute"));

    let mut row: Vec<String> = BASE_HEADERS
        .iter()
        .map(|header| cell(record, &selections, dimensions.as_deref(), header))
        .collect();

    // The main row shows the primary gallery followed by the main variant's
    // hi-res list, truncated to the batch-wide column budget.
    let mut images = record.main_images.clone();
    if let Some(variant_images) = record.hi_res_images_by_asin.get(&record.main_image_asin) {
        images.extend(variant_images.iter().cloned());
    }
    images.resize(max_images, String::new());
    row.extend(images);
    row
}

fn cell(
    record: &ProductRecord,
    selections: &VariantSelections,
    dimensions: Option<&str>,
    header: &str,
) -> String {
    match header {
        "Category" => record.category.clone(),
        "Sub-category" => record.sub_category.clone(),
        "ASIN" => record.asin.clone(),
        "Title" => record.title.clone(),
        "Link" => record.source_url.clone(),
        "Price" => numeric_price(&record.price),
        "Flavor Name" => selections.flavor_name.clone(),
        "Size" => selections.size.clone(),
        "Color" => selections.color.clone(),
        "Style" => selections.style.clone(),
        "Unknown" => selections.unknown.clone(),
        "Price Listing" => record.price.clone(),
        "Free Deli Day" => record.primary_delivery_info.clone(),
        "Prime Deli Day" => record.secondary_delivery_info.clone(),
        "Is Prime" => record.prime_badge.clone(),
        "Stock Status" => record.stock_status.clone(),
        "Ships From" => record.ships_from.clone(),
        "Sold By" => record.sold_by.clone(),
        "Description" => {
            if record.description.is_empty() {
                record.book_description.clone()
            } else {
                record.description.clone()
            }
        }
        "Ingredients" => record.ingredients.clone(),
        "Weight" => weight_cell(record, dimensions),
        "Length" => dimension_component(dimensions, 0),
        "Width" => dimension_component(dimensions, 1),
        "Height" => dimension_component(dimensions, 2),
        attribute => spec_for(attribute)
            .map(|spec| resolve_or_marker(record, spec))
            .unwrap_or_default(),
    }
}

/// A weight riding on the dimensions line (`"4 x 2 x 1 inches; 8 ounces"`)
/// wins over the generic weight lookup.
fn weight_cell(record: &ProductRecord, dimensions: Option<&str>) -> String {
    dimensions
        .and_then(extract_weight)
        .or_else(|| resolve_attribute(record, spec_for("Weight").expect("known attribute")))
        .unwrap_or_else(|| not_found_marker("Weight"))
}

fn dimension_component(dimensions: Option<&str>, index: usize) -> String {
    let Some((length, width, height)) = dimensions.and_then(split_dimensions) else {
        return String::new();
    };
    match index {
        0 => length,
        1 => width,
        _ => height,
    }
}

fn numeric_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// One row per variant ASIN that differs from the main image ASIN, carrying
/// only the ASIN and that variant's images.
fn variant_rows(record: &ProductRecord, max_images: usize) -> Vec<Vec<String>> {
    let mut asins: Vec<String> = Vec::new();
    for line in record.variants_text.lines() {
        let Some(rest) = line.strip_prefix("ASIN:") else {
            continue;
        };
        let asin = rest.trim().to_string();
        if !asin.is_empty() && asin != record.main_image_asin && !asins.contains(&asin) {
            asins.push(asin);
        }
    }

    asins
        .into_iter()
        .map(|asin| {
            let mut row = vec![String::new(); BASE_HEADERS.len()];
            row[asin_column()] = asin.clone();

            let mut images = record
                .hi_res_images_by_asin
                .get(&asin)
                .cloned()
                .unwrap_or_default();
            images.resize(max_images, String::new());
            row.extend(images);
            row
        })
        .collect()
}

fn asin_column() -> usize {
    BASE_HEADERS
        .iter()
        .position(|header| *header == "ASIN")
        .expect("ASIN column present")
}

#[cfg(test)]
#[path = "rows_test.rs"]
mod tests;
