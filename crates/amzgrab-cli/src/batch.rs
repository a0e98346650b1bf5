//! Group-scheduled batch runs over the extraction pipeline.
//!
//! Identifiers are partitioned into fixed-size groups; one extraction per
//! group member runs concurrently and the whole group is awaited before the
//! next one starts, so cancellation takes effect only at group boundaries.
//! Per-item completion is reported as structured events over a channel — the
//! runner never appends to a shared log buffer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use amzgrab_core::ProductRecord;
use amzgrab_extract::{extract_product, ProxyClient};

/// Outcome of one batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Succeeded,
    Failed,
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Succeeded => write!(f, "succeeded"),
            ItemStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Structured completion event for one batch item.
#[derive(Debug, Clone)]
pub struct ScrapeEvent {
    pub identifier: String,
    pub status: ItemStatus,
    /// Title on success, error description on failure.
    pub detail: String,
}

/// Splits a raw input blob into identifiers: whitespace and commas both
/// separate entries.
#[must_use]
pub fn split_input_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Runs the extraction pipeline over `items` in groups of `group_size`.
///
/// Always yields one record per processed input — per-item failures
/// (including malformed identifiers) are absorbed into error-shaped records.
/// The cancellation flag is checked between groups only; an in-flight group
/// runs to completion.
pub async fn run_batch(
    client: &ProxyClient,
    items: &[String],
    niche_hint: Option<&str>,
    api_key: &str,
    group_size: usize,
    cancel: &Arc<AtomicBool>,
    events: &mpsc::UnboundedSender<ScrapeEvent>,
) -> Vec<ProductRecord> {
    let mut records = Vec::with_capacity(items.len());

    for group in items.chunks(group_size.max(1)) {
        if cancel.load(Ordering::SeqCst) {
            tracing::info!(
                remaining = items.len() - records.len(),
                "cancellation requested — stopping before the next group"
            );
            break;
        }

        let group_records = futures::future::join_all(
            group
                .iter()
                .map(|item| scrape_one(client, item, niche_hint, api_key, events)),
        )
        .await;
        records.extend(group_records);
    }

    records
}

async fn scrape_one(
    client: &ProxyClient,
    item: &str,
    niche_hint: Option<&str>,
    api_key: &str,
    events: &mpsc::UnboundedSender<ScrapeEvent>,
) -> ProductRecord {
    match extract_product(client, item, niche_hint, api_key).await {
        Ok(record) => {
            let status = if record.is_error_fallback() {
                ItemStatus::Failed
            } else {
                ItemStatus::Succeeded
            };
            let detail = if status == ItemStatus::Succeeded {
                record.title.clone()
            } else {
                "extraction failed — error record produced".to_string()
            };
            events
                .send(ScrapeEvent {
                    identifier: item.to_string(),
                    status,
                    detail,
                })
                .ok();
            record
        }
        Err(err) => {
            events
                .send(ScrapeEvent {
                    identifier: item.to_string(),
                    status: ItemStatus::Failed,
                    detail: err.to_string(),
                })
                .ok();
            // Even a malformed identifier yields a renderable row.
            ProductRecord::error_fallback(item, "")
        }
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
