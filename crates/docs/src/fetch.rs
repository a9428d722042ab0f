//! Remote content retrieval with bounded retries.
//!
//! [`ContentSource`] is the seam between the index and the network: the index
//! only ever asks for "the text behind this URL". [`HttpFetcher`] is the real
//! implementation; tests substitute in-memory sources.

use reqwest::{Client, Method};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::DocsConfig;
use crate::error::FetchError;

/// Anything that can turn a URL into UTF-8 text.
pub trait ContentSource: Send + Sync {
    /// Retrieve the full text behind `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// When and how long to wait before repeating a failed request.
///
/// Shared by every HTTP caller in the tool. Requests that mutate server state
/// are never repeated, whatever the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per request, first try included.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `initial_backoff * 2^retry`.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff.saturating_mul(1 << retry.min(16))
    }

    /// Whether a request issued with `method` that failed with `error` on
    /// attempt `attempt` (1-based) should be sent again.
    pub fn should_retry(&self, method: &Method, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_attempts && is_read_only(method) && error.is_transient()
    }
}

impl From<&DocsConfig> for RetryPolicy {
    fn from(config: &DocsConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: config.initial_backoff(),
        }
    }
}

fn is_read_only(method: &Method) -> bool {
    [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE].contains(method)
}

/// reqwest-backed [`ContentSource`] with timeout, user agent and retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Build a fetcher from the timeout, retry and user-agent settings.
    pub fn new(config: &DocsConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            policy: RetryPolicy::from(config),
        })
    }

    /// Retry policy in effect.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    async fn get_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if text.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        Ok(text)
    }
}

impl ContentSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.get_once(url).await {
                Ok(text) => {
                    debug!(url, attempt, bytes = text.len(), "Fetched document");
                    return Ok(text);
                }
                Err(err) if self.policy.should_retry(&Method::GET, &err, attempt) => {
                    let delay = self.policy.backoff(attempt - 1);
                    warn!(
                        url,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "HTTP request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
