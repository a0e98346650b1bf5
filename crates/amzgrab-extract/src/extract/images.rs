//! Image-link extraction from script-embedded payloads.
//!
//! The page does not list hi-res image URLs in markup; they live in two
//! script blobs — the ATF image block for the primary gallery, and a
//! `jQuery.parseJSON('…')` literal mapping color labels to image descriptor
//! lists and to variant ASINs. Neither format is contractually stable, so
//! extraction here always degrades to empty collections instead of raising:
//! image absence must never fail the whole extraction.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::Value;

/// Canonical image-CDN path; anything else is a thumbnail or sprite.
const IMAGE_CDN_PREFIX: &str = "https://m.media-amazon.com/images/I/";

/// Hi-res URLs of the primary image gallery, first-seen order, deduplicated.
pub(crate) fn main_images(scripts: &[String]) -> Vec<String> {
    let Some(blob) = scripts.iter().find(|s| s.contains("ImageBlockATF")) else {
        return Vec::new();
    };
    let re = Regex::new(r#""hiRes":\s*"(https://m\.media-amazon\.com/images/I/[^"]+\.jpg)""#)
        .expect("valid regex");

    let mut urls: Vec<String> = Vec::new();
    for caps in re.captures_iter(blob) {
        let url = caps[1].to_string();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

/// Per-variant hi-res image lists, keyed by variant ASIN.
///
/// Joins the payload's `colorImages` (color label → image descriptors) with
/// `colorToAsin` (color label → `{asin}`); colors with no ASIN mapping are
/// dropped. A missing or malformed payload yields an empty map.
pub(crate) fn hi_res_images_by_asin(scripts: &[String]) -> BTreeMap<String, Vec<String>> {
    variant_image_payload(scripts)
        .map(join_color_maps)
        .unwrap_or_default()
}

fn variant_image_payload(scripts: &[String]) -> Option<Value> {
    let blob = scripts
        .iter()
        .find(|s| s.contains("var obj = jQuery.parseJSON("))?;
    let re = Regex::new(r"(?s)var obj = jQuery\.parseJSON\('(.+?)'\);").expect("valid regex");
    let raw = re.captures(blob)?.get(1)?.as_str();
    // The payload is a JSON object inside a single-quoted JS string literal;
    // only the quote escapes need undoing before it parses as JSON.
    let unescaped = raw.replace("\\'", "'");

    match serde_json::from_str(&unescaped) {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::debug!(error = %err, "embedded variant-image payload does not parse — skipping");
            None
        }
    }
}

fn join_color_maps(payload: Value) -> BTreeMap<String, Vec<String>> {
    let mut by_asin = BTreeMap::new();
    let Some(color_images) = payload.get("colorImages").and_then(Value::as_object) else {
        return by_asin;
    };
    let color_to_asin = payload.get("colorToAsin").and_then(Value::as_object);

    for (color, descriptors) in color_images {
        let Some(asin) = color_to_asin
            .and_then(|map| map.get(color))
            .and_then(|entry| entry.get("asin"))
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(descriptors) = descriptors.as_array() else {
            continue;
        };

        let mut urls: Vec<String> = Vec::new();
        for descriptor in descriptors {
            let Some(url) = descriptor.get("hiRes").and_then(Value::as_str) else {
                continue;
            };
            if url.contains(IMAGE_CDN_PREFIX) && !urls.iter().any(|u| u == url) {
                urls.push(url.to_string());
            }
        }
        by_asin.insert(asin.to_string(), urls);
    }
    by_asin
}
