//! The fetch-and-persist loop.
//!
//! Walks the paginated model listing until the hub is exhausted or a request
//! fails terminally, then writes everything accumulated so far to a CSV
//! file. Fetch failures stop the walk but never escape it; persistence runs
//! regardless of how the walk ended.

use std::fs;
use std::path::Path;

use crate::client::HubClient;
use crate::error::{ClientError, SnapshotResult};
use crate::models::ModelRecord;

/// What a single page request produced.
enum PageStep {
    /// Normalized records plus the cursor for the next request, if any.
    Filled { records: Vec<ModelRecord>, next_cursor: Option<String> },

    /// The hub answered with an empty page.
    Exhausted,

    /// The request or decode failed after the client's retries.
    Failed(ClientError),
}

/// Why the fetch loop stopped.
#[derive(Debug)]
pub enum StopReason {
    /// The hub ran out of pages (empty page or no next-cursor header).
    Exhausted,

    /// A page request failed; records fetched before it are kept.
    Failed(ClientError),
}

impl StopReason {
    /// Check whether the walk covered the full listing.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// The accumulated result of one fetch run.
#[derive(Debug)]
pub struct Snapshot {
    /// Records in the order the hub returned them.
    pub records: Vec<ModelRecord>,

    /// How the walk ended.
    pub stop: StopReason,
}

/// Request one page and normalize its entries.
///
/// A page's records exist only if the whole page decoded; a decode failure
/// surfaces as [`PageStep::Failed`] and contributes nothing.
async fn fetch_page(client: &HubClient, cursor: Option<&str>) -> PageStep {
    match client.list_models(cursor).await {
        Ok(page) if page.is_empty() => PageStep::Exhausted,
        Ok(page) => {
            let records = page.models.iter().map(ModelRecord::from).collect();
            PageStep::Filled { records, next_cursor: page.next_cursor }
        }
        Err(err) => PageStep::Failed(err),
    }
}

/// Walk the listing from the first page until exhaustion or failure.
pub async fn fetch_all(client: &HubClient) -> Snapshot {
    let mut records: Vec<ModelRecord> = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        match fetch_page(client, cursor.as_deref()).await {
            PageStep::Filled { records: page_records, next_cursor } => {
                tracing::info!(
                    received = page_records.len(),
                    cursor = cursor.as_deref().unwrap_or("initial"),
                    "received models from the hub"
                );
                records.extend(page_records);

                let Some(next) = next_cursor else {
                    tracing::info!("no more pages to fetch");
                    return Snapshot { records, stop: StopReason::Exhausted };
                };
                cursor = Some(next);
            }
            PageStep::Exhausted => {
                tracing::info!("no more model data received from the hub");
                return Snapshot { records, stop: StopReason::Exhausted };
            }
            PageStep::Failed(err) => {
                tracing::error!(error = %err, "error fetching model data");
                return Snapshot { records, stop: StopReason::Failed(err) };
            }
        }
    }
}

/// Write records to a CSV file, creating the parent directory if needed.
///
/// The header row comes from the record's field names; an existing file at
/// the path is overwritten.
///
/// # Errors
///
/// Returns error if the directory cannot be created or a row fails to
/// serialize.
pub fn write_csv(records: &[ModelRecord], path: &Path) -> SnapshotResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Fetch the whole listing and persist whatever was accumulated.
///
/// An empty accumulation skips the write entirely, so a failed first page
/// leaves no file behind.
///
/// # Errors
///
/// Returns error only for persistence failures; fetch failures are captured
/// in the returned snapshot's [`StopReason`].
pub async fn run(client: &HubClient, output: &Path) -> SnapshotResult<Snapshot> {
    let snapshot = fetch_all(client).await;

    if snapshot.records.is_empty() {
        tracing::warn!("no models were fetched");
        return Ok(snapshot);
    }

    tracing::info!(total = snapshot.records.len(), "total models fetched");
    write_csv(&snapshot.records, output)?;
    tracing::info!(path = %output.display(), "model data saved");

    Ok(snapshot)
}
