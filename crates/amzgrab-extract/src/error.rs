use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or malformed caller input. Raised before any network
    /// activity and surfaced directly — never absorbed into a fallback
    /// record.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by proxy (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The fetched document does not look like a product page (bot
    /// interstitial, dead listing, truncated body).
    #[error("product markup missing expected region: {region}")]
    MarkupStructure { region: &'static str },
}

impl ScrapeError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns `true` for pre-I/O input validation failures.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
