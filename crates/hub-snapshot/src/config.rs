//! Configuration for the hub snapshot run.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Model listing endpoint on the hub.
    pub const MODELS_URL: &str = "https://huggingface.co/api/models";

    /// Number of models requested per page.
    pub const PAGE_SIZE: usize = 2000;

    /// Response header carrying the next page token.
    pub const NEXT_CURSOR_HEADER: &str = "X-Next-Cursor";

    /// Where the snapshot is written.
    pub const OUTPUT_PATH: &str = "data/models_data.csv";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum retries per request for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Minimum backoff delay between retries.
    pub const RETRY_MIN_DELAY: Duration = Duration::from_secs(1);

    /// Maximum backoff delay between retries.
    pub const RETRY_MAX_DELAY: Duration = Duration::from_secs(8);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Run configuration.
///
/// Built once in `main` and handed to [`crate::HubClient::new`]; nothing in
/// the crate reads configuration from globals.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hub access token (optional, raises anonymous rate limits).
    pub token: Option<String>,

    /// Model listing URL (overridable for testing with mock servers).
    pub models_url: String,

    /// Models requested per page.
    pub page_size: usize,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retry budget for transient failures.
    pub max_retries: u32,

    /// Minimum retry backoff delay.
    pub retry_min_delay: Duration,

    /// Maximum retry backoff delay.
    pub retry_max_delay: Duration,

    /// Snapshot output path.
    pub output_path: PathBuf,
}

impl Config {
    /// Create a new configuration with an optional hub token.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            models_url: api::MODELS_URL.to_string(),
            page_size: api::PAGE_SIZE,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
            retry_min_delay: api::RETRY_MIN_DELAY,
            retry_max_delay: api::RETRY_MAX_DELAY,
            output_path: PathBuf::from(api::OUTPUT_PATH),
        }
    }

    /// Create a test configuration pointed at a mock server.
    ///
    /// Pages are small and backoff is shrunk so retry paths run in
    /// milliseconds.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            token: None,
            models_url: format!("{base_url}/api/models"),
            page_size: 2,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            max_retries: 2,
            retry_min_delay: Duration::from_millis(10),
            retry_max_delay: Duration::from_millis(50),
            output_path: PathBuf::from("models_data.csv"),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("HF_TOKEN").ok();
        Ok(Self::new(token))
    }

    /// Check if a hub token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
