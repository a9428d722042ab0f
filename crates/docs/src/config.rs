//! Settings for the documentation index.
//!
//! Defaults can be overridden through `SKYCTL_DOCS_*` environment variables.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{DocsError, Result};

/// Manifest listing every documentation page.
pub const DEFAULT_MANIFEST_URL: &str = "https://docs.skyctl.dev/llms.txt";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 4;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 250;
const DEFAULT_FETCH_CONCURRENCY: usize = 8;

const ENV_MANIFEST_URL: &str = "SKYCTL_DOCS_MANIFEST_URL";
const ENV_TIMEOUT_SECS: &str = "SKYCTL_DOCS_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "SKYCTL_DOCS_MAX_ATTEMPTS";
const ENV_CONCURRENCY: &str = "SKYCTL_DOCS_CONCURRENCY";

/// Documentation index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// URL of the `llms.txt` manifest.
    pub manifest_url: String,
    /// Total timeout of a single HTTP request, in seconds.
    pub timeout_secs: u64,
    /// Attempts per URL, first try included.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub initial_backoff_ms: u64,
    /// Pages fetched concurrently while building the index.
    pub fetch_concurrency: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            user_agent: default_user_agent(),
        }
    }
}

/// `skyctl-docs/<version>`
pub fn default_user_agent() -> String {
    format!("skyctl-docs/{}", env!("CARGO_PKG_VERSION"))
}

impl DocsConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each
    /// `SKYCTL_DOCS_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_MANIFEST_URL).filter(|v| !v.trim().is_empty()) {
            config.manifest_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_positive(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            config.max_attempts = parse_positive(ENV_MAX_ATTEMPTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONCURRENCY) {
            config.fetch_concurrency = parse_positive(ENV_CONCURRENCY, &raw)?;
        }

        tracing::debug!(?config, "Resolved docs configuration");
        Ok(config)
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay before the first retry.
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }
}

fn parse_positive<T>(key: &'static str, raw: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(DocsError::Config {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = DocsConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DocsConfig::default());
        assert_eq!(config.manifest_url, DEFAULT_MANIFEST_URL);
        assert!(config.user_agent.starts_with("skyctl-docs/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = DocsConfig::from_lookup(lookup_from(&[
            ("SKYCTL_DOCS_MANIFEST_URL", " https://mirror.test/llms.txt "),
            ("SKYCTL_DOCS_TIMEOUT_SECS", "5"),
            ("SKYCTL_DOCS_MAX_ATTEMPTS", "2"),
            ("SKYCTL_DOCS_CONCURRENCY", "16"),
        ]))
        .unwrap();

        assert_eq!(config.manifest_url, "https://mirror.test/llms.txt");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.fetch_concurrency, 16);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = DocsConfig::from_lookup(lookup_from(&[("SKYCTL_DOCS_MAX_ATTEMPTS", "many")]))
            .unwrap_err();
        assert!(matches!(
            err,
            DocsError::Config {
                key: "SKYCTL_DOCS_MAX_ATTEMPTS",
                ..
            }
        ));

        let err = DocsConfig::from_lookup(lookup_from(&[("SKYCTL_DOCS_CONCURRENCY", "0")]))
            .unwrap_err();
        assert!(matches!(err, DocsError::Config { .. }));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: DocsConfig =
            serde_json::from_str(r#"{"manifest_url": "https://mirror.test/llms.txt"}"#).unwrap();
        assert_eq!(config.manifest_url, "https://mirror.test/llms.txt");
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
    }
}
