//! Heuristic attribute resolution across a record's detail sources.
//!
//! One generic routine, parameterized by an [`AttributeSpec`], backs every
//! attribute lookup (UPC, Brand, ISBN-13, Weight, …). The routine walks the
//! four detail sources in the fixed order given by
//! [`ProductRecord::detail_sources`] and returns the first match:
//!
//! - in a mapping source, keys are scanned in insertion order and match when
//!   any search term appears in the key, case-insensitively;
//! - in a text source, lines are scanned in order and match the same way;
//!   the value is the trimmed remainder after the first colon. A matching
//!   line with no colon is treated as a non-match.
//!
//! Key scanning within a source always runs before any shape concern — the
//! shape filter applies to the matched value, never to source selection.
//!
//! Shape-filtered attributes (weight, dimensions) additionally require the
//! matched text to contain a recognizable numeric form; a candidate that
//! fails its shape filter does not stop the search, so a later source can
//! still supply a conforming value.

use regex::Regex;

use crate::record::{DetailSource, ProductRecord};

/// Value-shape filter applied to a matched raw value before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// `N <unit>` where unit is one of ounces/pounds/grams/kilograms/oz/lbs/g/kg.
    Weight,
    /// `N x N x N`.
    Dimensions,
}

/// Configuration for one resolvable attribute.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSpec {
    /// Display name, used for spreadsheet columns and the not-found marker.
    pub name: &'static str,
    /// Case-insensitive substrings matched against source keys and lines.
    pub terms: &'static [&'static str],
    /// Optional shape filter for the matched value.
    pub shape: Option<ValueShape>,
}

/// Every attribute the export surface resolves. One table, one routine —
/// never per-attribute lookup functions.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    AttributeSpec { name: "UPC", terms: &["upc"], shape: None },
    AttributeSpec { name: "Brand", terms: &["brand"], shape: None },
    AttributeSpec { name: "Manufacturer", terms: &["manufacturer"], shape: None },
    AttributeSpec { name: "Item Form", terms: &["item form"], shape: None },
    AttributeSpec { name: "Product Benefits", terms: &["product benefits"], shape: None },
    AttributeSpec { name: "Scent", terms: &["scent"], shape: None },
    AttributeSpec { name: "Material Type", terms: &["material"], shape: None },
    AttributeSpec { name: "Skin Type", terms: &["skin type"], shape: None },
    AttributeSpec { name: "Item Volume", terms: &["item volume"], shape: None },
    AttributeSpec { name: "Age Range", terms: &["age range"], shape: None },
    AttributeSpec { name: "Special Feature", terms: &["special feature"], shape: None },
    AttributeSpec { name: "Publisher", terms: &["publisher"], shape: None },
    AttributeSpec { name: "Language", terms: &["language"], shape: None },
    AttributeSpec { name: "Paperback", terms: &["paperback"], shape: None },
    AttributeSpec { name: "Hardcover", terms: &["hardcover"], shape: None },
    AttributeSpec { name: "ISBN-10", terms: &["isbn-10"], shape: None },
    AttributeSpec { name: "ISBN-13", terms: &["isbn-13"], shape: None },
    AttributeSpec { name: "Weight", terms: &["weight"], shape: Some(ValueShape::Weight) },
    AttributeSpec {
        name: "Dimensions",
        terms: &["dimensions"],
        shape: Some(ValueShape::Dimensions),
    },
];

/// Looks up an [`AttributeSpec`] by display name.
#[must_use]
pub fn spec_for(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTES.iter().find(|spec| spec.name == name)
}

/// Resolves one attribute against the record's detail sources.
///
/// Returns the first cleaned, shape-conforming value, or `None` when no
/// source yields one.
#[must_use]
pub fn resolve_attribute(record: &ProductRecord, spec: &AttributeSpec) -> Option<String> {
    for source in record.detail_sources() {
        let raw = match source {
            DetailSource::Pairs(pairs) => match_pairs(pairs, spec.terms),
            DetailSource::Text(text) => match_lines(text, spec.terms),
        };
        let Some(raw) = raw else { continue };
        let value = clean_value(&raw);
        if value.is_empty() {
            continue;
        }
        match spec.shape {
            None => return Some(value),
            Some(ValueShape::Weight) => {
                if let Some(weight) = extract_weight(&value) {
                    return Some(weight);
                }
            }
            Some(ValueShape::Dimensions) => {
                if split_dimensions(&value).is_some() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Resolves one attribute, substituting the not-found marker when no source
/// yields a value — spreadsheet cells stay self-describing instead of blank.
#[must_use]
pub fn resolve_or_marker(record: &ProductRecord, spec: &AttributeSpec) -> String {
    resolve_attribute(record, spec).unwrap_or_else(|| not_found_marker(spec.name))
}

/// The deterministic not-found marker for an attribute display name.
#[must_use]
pub fn not_found_marker(name: &str) -> String {
    format!("no {name} found")
}

/// Cleans a raw matched value: strips leading whitespace, bidirectional
/// marks, a literal `&lrm;` escape token, and leading colons, then trims.
#[must_use]
pub fn clean_value(raw: &str) -> String {
    let stripped = raw.trim_start_matches(|c: char| {
        c.is_whitespace() || c == ':' || c == '\u{200e}' || c == '\u{200f}'
    });
    let stripped = stripped.strip_prefix("&lrm;").unwrap_or(stripped);
    stripped.trim().to_string()
}

/// Extracts a `N <unit>` weight from a raw value, e.g. `"1.2 pounds"` out of
/// `"Item Weight: 1.2 pounds (pack of 3)"`.
#[must_use]
pub fn extract_weight(raw: &str) -> Option<String> {
    let re = Regex::new(r"(?i)(\d+(\.\d+)?)\s*(ounces|pounds|grams|kilograms|oz|lbs|g|kg)")
        .expect("valid regex");
    re.find(raw).map(|m| m.as_str().to_string())
}

/// Splits a `N x N x N` dimensions value into its three numeric components.
#[must_use]
pub fn split_dimensions(raw: &str) -> Option<(String, String, String)> {
    let re = Regex::new(r"(\d+(\.\d+)?)\s*x\s*(\d+(\.\d+)?)\s*x\s*(\d+(\.\d+)?)")
        .expect("valid regex");
    let caps = re.captures(raw)?;
    Some((caps[1].to_string(), caps[3].to_string(), caps[5].to_string()))
}

fn match_pairs(pairs: &[(String, String)], terms: &[&str]) -> Option<String> {
    pairs.iter().find_map(|(key, value)| {
        let key = key.to_lowercase();
        terms
            .iter()
            .any(|term| key.contains(term))
            .then(|| value.clone())
    })
}

fn match_lines(text: &str, terms: &[&str]) -> Option<String> {
    for line in text.lines() {
        let lower = line.to_lowercase();
        if terms.iter().any(|term| lower.contains(term)) {
            if let Some((_, rest)) = line.split_once(':') {
                return Some(rest.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
