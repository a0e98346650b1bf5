//! Parser for the normalized variant text blob.
//!
//! The extraction side emits one blob per page enumerating every variant
//! axis (see the extract crate); this module reads that blob back into the
//! fixed selection set the export surface needs. Parser and extractor are
//! round-trip counterparts and are tested together.

use serde::{Deserialize, Serialize};

/// The currently-selected value per variant axis.
///
/// All five keys are always present; axes the page does not offer stay
/// empty. Selections under a label that is not one of the four known axes
/// accumulate in `unknown` as `<label>: <selection>` entries joined by
/// `"; "`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelections {
    pub flavor_name: String,
    pub size: String,
    pub color: String,
    pub style: String,
    pub unknown: String,
}

/// Reads a variant text blob back into per-axis selections.
///
/// Pure and total: any input (including the no-variant sentinel or garbage)
/// yields a `VariantSelections` with all five keys. The parser tracks the
/// most recent `LABEL:` line and buckets each following `SELECTION:` line
/// under it.
#[must_use]
pub fn parse_variants_text(text: &str) -> VariantSelections {
    let mut selections = VariantSelections::default();
    let mut unknown: Vec<String> = Vec::new();
    let mut current_label = String::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("LABEL:") {
            current_label = rest.trim().trim_end_matches(':').to_string();
        } else if let Some(rest) = line.strip_prefix("SELECTION:") {
            if current_label.is_empty() {
                continue;
            }
            let selection = rest.trim().to_string();
            match current_label.as_str() {
                "Flavor Name" => selections.flavor_name = selection,
                "Size" => selections.size = selection,
                "Color" => selections.color = selection,
                "Style" => selections.style = selection,
                _ => unknown.push(format!("{current_label}: {selection}")),
            }
        }
    }

    selections.unknown = unknown.join("; ");
    selections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_axes_bucket_under_their_label() {
        let text = "LABEL:Color\nSELECTION:Red\n\nColor: Red\nASIN: B1\n\nColor: Blue\nASIN: B2\n\nLABEL:Size\nSELECTION:Large\n";
        let selections = parse_variants_text(text);
        assert_eq!(selections.color, "Red");
        assert_eq!(selections.size, "Large");
        assert_eq!(selections.flavor_name, "");
        assert_eq!(selections.style, "");
        assert_eq!(selections.unknown, "");
    }

    #[test]
    fn unknown_labels_accumulate_semicolon_separated() {
        let text = "LABEL:Pattern Name\nSELECTION:Striped\nLABEL:Team Name\nSELECTION:Home\n";
        let selections = parse_variants_text(text);
        assert_eq!(
            selections.unknown,
            "Pattern Name: Striped; Team Name: Home"
        );
    }

    #[test]
    fn label_trailing_colon_is_stripped() {
        let text = "LABEL:Flavor Name:\nSELECTION:Vanilla\n";
        assert_eq!(parse_variants_text(text).flavor_name, "Vanilla");
    }

    #[test]
    fn selection_without_label_is_ignored() {
        let text = "SELECTION:Orphan\nLABEL:Size\nSELECTION:Small\n";
        let selections = parse_variants_text(text);
        assert_eq!(selections.size, "Small");
        assert_eq!(selections.unknown, "");
    }

    #[test]
    fn selection_value_keeps_embedded_colons() {
        let text = "LABEL:Style\nSELECTION:Pack of 2: Refill\n";
        assert_eq!(parse_variants_text(text).style, "Pack of 2: Refill");
    }

    #[test]
    fn sentinel_and_garbage_are_total() {
        assert_eq!(
            parse_variants_text("no variant information"),
            VariantSelections::default()
        );
        assert_eq!(parse_variants_text(""), VariantSelections::default());
    }
}
