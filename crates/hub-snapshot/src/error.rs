//! Error types for the hub snapshot tool.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations.

use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by the hub after the retry budget ran out (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Endpoint not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the hub
        message: String,
    },

    /// Body shape did not match the listing schema
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error that survived the retry budget (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Returns true if this error is of a kind the HTTP layer retries.
    ///
    /// By the time one of these reaches the fetch loop the retry budget is
    /// already spent, so the loop treats them as terminal either way.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Server { .. })
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from persisting the snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Filesystem error (directory creation, flush)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
