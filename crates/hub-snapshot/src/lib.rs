//! Hub Model-Listing Snapshot
//!
//! Walks the Hugging Face model-listing API page by page and persists the
//! result as a local CSV dataset for offline analysis.
//!
//! # Features
//!
//! - **Paginated fetch**: follows the listing's cursor until exhaustion
//! - **Retried transport**: exponential backoff on 429/5xx and connection
//!   failures, bounded per request
//! - **Partial persistence**: a failed walk still writes everything fetched
//!   before the failure
//!
//! # Example
//!
//! ```no_run
//! use hub_snapshot::{HubClient, config::Config, snapshot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let output = config.output_path.clone();
//!     let client = HubClient::new(config)?;
//!
//!     let snapshot = snapshot::run(&client, &output).await?;
//!     println!("fetched {} models", snapshot.records.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod snapshot;

pub use client::HubClient;
pub use config::Config;
pub use error::{ClientError, SnapshotError};
