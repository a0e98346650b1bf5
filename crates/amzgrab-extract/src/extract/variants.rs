//! Variant-axis extraction.
//!
//! Walks the four known per-attribute selection widgets and renders one
//! normalized text blob: per present axis a `LABEL:`/`SELECTION:` pair for
//! the currently-selected value, then one `<Axis>: <value>` / `ASIN: <id>`
//! pair per selectable option. The core crate's variant parser reads this
//! blob back; the two sides are round-trip counterparts.

use scraper::{ElementRef, Html};

use amzgrab_core::NO_VARIANT_INFO;

use super::sections::{element_text, sel};

/// Widget id and axis display name, in fixed output order.
const VARIANT_AXES: &[(&str, &str)] = &[
    ("variation_flavor_name", "Flavor"),
    ("variation_size_name", "Size"),
    ("variation_color_name", "Color"),
    ("variation_style_name", "Style"),
];

/// List-item option titles carry a click-affordance prefix.
const OPTION_TITLE_PREFIX: &str = "Click to select ";

pub(crate) fn variants_text(doc: &Html) -> String {
    let mut out = String::new();
    for (widget_id, axis) in VARIANT_AXES {
        let Some(widget) = doc.select(&sel(&format!("#{widget_id}"))).next() else {
            continue;
        };
        out.push_str(&axis_text(widget, axis));
    }

    if out.is_empty() {
        NO_VARIANT_INFO.to_string()
    } else {
        out
    }
}

fn axis_text(widget: ElementRef<'_>, axis: &str) -> String {
    let mut out = String::new();

    let label = widget
        .select(&sel("label.a-form-label"))
        .next()
        .map(element_text)
        .unwrap_or_default();
    let selection = widget
        .select(&sel("span.selection"))
        .next()
        .map(element_text)
        .unwrap_or_default();
    if !label.is_empty() && !selection.is_empty() {
        out.push_str(&format!(
            "LABEL:{}\nSELECTION:{selection}\n\n",
            label.trim_end_matches(':')
        ));
    }

    // Swatch widget: one list item per option.
    for item in widget.select(&sel("li")) {
        let Some(title) = item.value().attr("title") else {
            continue;
        };
        let value = title.strip_prefix(OPTION_TITLE_PREFIX).unwrap_or(title);
        let Some(item_id) = item.value().attr("data-csa-c-item-id") else {
            continue;
        };
        if !value.is_empty() && !item_id.is_empty() {
            out.push_str(&format!("{axis}: {value}\nASIN: {item_id}\n\n"));
        }
    }

    // Dropdown widget: option text plus the ASIN half of its value.
    let dropdown = sel(&format!(
        r#"select[name="dropdown_selected_{}_name"] option"#,
        axis.to_lowercase()
    ));
    for option in widget.select(&dropdown) {
        let text = element_text(option);
        let Some(value_attr) = option.value().attr("value") else {
            continue;
        };
        let Some(asin) = value_attr.split(',').nth(1) else {
            continue;
        };
        if !text.is_empty() && !asin.is_empty() {
            out.push_str(&format!("{axis}: {text}\nASIN: {asin}\n\n"));
        }
    }

    out
}
