//! Hub API client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff for 429/5xx and
//!   connection-level failures
//! - Optional bearer-token authentication

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ModelPage, ModelSummary};

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Hub API client.
///
/// Constructed once per run from [`Config`]; the retry policy lives in the
/// middleware stack, so callers issue each request exactly once.
#[derive(Clone)]
pub struct HubClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Hub token (optional).
    token: Option<String>,

    /// Model listing URL.
    models_url: String,

    /// Models requested per page.
    page_size: usize,
}

impl HubClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            USER_AGENT.parse().expect("valid user-agent header"),
        );

        if let Some(ref token) = config.token {
            headers.insert(reqwest::header::AUTHORIZATION, format!("Bearer {token}").parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(config.retry_min_delay, config.retry_max_delay)
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            token: config.token,
            models_url: config.models_url,
            page_size: config.page_size,
        })
    }

    /// Check if a hub token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch one page of the model listing.
    ///
    /// The cursor from the previous page is passed through verbatim; `None`
    /// requests the first page. The next page's cursor is read from the
    /// response header before the body is consumed; its absence means the
    /// listing is exhausted.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn list_models(&self, cursor: Option<&str>) -> ClientResult<ModelPage> {
        let mut params = vec![("limit".to_string(), self.page_size.to_string())];

        if let Some(cursor) = cursor {
            params.push(("cursor".to_string(), cursor.to_string()));
        }

        tracing::debug!(cursor = cursor.unwrap_or("initial"), "requesting model listing page");

        let response = self.client.get(&self.models_url).query(&params).send().await?;
        let response = self.handle_response(response).await?;

        let next_cursor = response
            .headers()
            .get(api::NEXT_CURSOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        let value: serde_json::Value = response.json().await?;
        let models: Vec<ModelSummary> = serde_json::from_value(value)?;

        Ok(ModelPage { models, next_cursor })
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
            .field("models_url", &self.models_url)
            .field("page_size", &self.page_size)
            .field("has_token", &self.has_token())
            .finish()
    }
}
