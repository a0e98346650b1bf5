//! Resolution of a caller-supplied identifier (bare ASIN or product URL)
//! into the canonical `(asin, source_url)` pair.

use regex::Regex;

use crate::error::ScrapeError;

/// Resolves an input identifier into its ASIN and canonical product URL.
///
/// A URL input keeps its original form as the source URL and must carry an
/// ASIN in the fixed `/dp/<ASIN>` path segment; a bare input must be a
/// plausible 10-character ASIN and is expanded to the canonical product URL.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidInput`] for an empty identifier, a URL with
/// no recognizable ASIN, or a malformed bare identifier. This runs before
/// any network activity.
pub fn resolve_identifier(input: &str) -> Result<(String, String), ScrapeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScrapeError::invalid_input("identifier is empty"));
    }

    if input.starts_with("http") {
        let re = Regex::new(r"/dp/([A-Z0-9]{10})").expect("valid regex");
        let asin = re
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                ScrapeError::invalid_input(format!("no ASIN found in URL \"{input}\""))
            })?;
        return Ok((asin, input.to_string()));
    }

    let re = Regex::new(r"^[A-Z0-9]{10}$").expect("valid regex");
    if !re.is_match(input) {
        return Err(ScrapeError::invalid_input(format!(
            "\"{input}\" is not a 10-character ASIN"
        )));
    }
    Ok((
        input.to_string(),
        format!("https://www.amazon.com/dp/{input}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_asin_expands_to_canonical_url() {
        let (asin, url) = resolve_identifier("B08N5WRWNW").unwrap();
        assert_eq!(asin, "B08N5WRWNW");
        assert_eq!(url, "https://www.amazon.com/dp/B08N5WRWNW");
    }

    #[test]
    fn url_input_yields_embedded_asin() {
        let (asin, url) =
            resolve_identifier("https://www.amazon.com/dp/B08N5WRWNW?th=1").unwrap();
        assert_eq!(asin, "B08N5WRWNW");
        assert_eq!(url, "https://www.amazon.com/dp/B08N5WRWNW?th=1");
    }

    #[test]
    fn url_with_product_slug_still_resolves() {
        let (asin, _) =
            resolve_identifier("https://www.amazon.com/Some-Product-Name/dp/B000BAD000/ref=sr_1_1")
                .unwrap();
        assert_eq!(asin, "B000BAD000");
    }

    #[test]
    fn url_without_asin_is_invalid_input() {
        let err = resolve_identifier("https://www.amazon.com/gp/bestsellers").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn empty_identifier_is_invalid_input() {
        assert!(resolve_identifier("  ").unwrap_err().is_invalid_input());
    }

    #[test]
    fn short_identifier_is_invalid_input() {
        assert!(resolve_identifier("B08N5").unwrap_err().is_invalid_input());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let (asin, _) = resolve_identifier("  B08N5WRWNW\n").unwrap();
        assert_eq!(asin, "B08N5WRWNW");
    }
}
