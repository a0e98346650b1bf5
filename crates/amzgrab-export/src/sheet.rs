//! Spreadsheet rendering for projected rows.
//!
//! The writer seam is deliberately thin: rows are produced by
//! [`crate::rows`] and rendered here as CSV, the workspace's interchange
//! format. Callers that need a different spreadsheet engine plug in at the
//! row level.

use std::path::Path;

use thiserror::Error;

use amzgrab_core::ProductRecord;

use crate::rows;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write spreadsheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders a batch of records to a CSV file at `path`.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or a row fails to
/// serialize.
pub fn write_csv(path: &Path, records: &[ProductRecord]) -> Result<(), ExportError> {
    let max_images = rows::max_image_count(records);
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(rows::headers(max_images))?;
    for row in rows::project(records) {
        writer.write_record(&row)?;
    }
    writer.flush()?;

    tracing::info!(
        records = records.len(),
        image_columns = max_images,
        path = %path.display(),
        "spreadsheet written"
    );
    Ok(())
}

/// A timestamped default output name, e.g. `amazon_scrape_1754550000.csv`.
#[must_use]
pub fn default_output_name(prefix: &str) -> String {
    format!("{prefix}_{}.csv", chrono::Utc::now().timestamp())
}
