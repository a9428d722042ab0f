//! In-memory documentation site shared by the integration tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use skyctl_docs::{ContentSource, DocsConfig, FetchError};

pub const MANIFEST_URL: &str = "https://docs.test/llms.txt";

pub const MANIFEST: &str = "\
# skyctl

> Control-plane CLI documentation.

## Getting Started
- [Install](https://docs.test/start/install.md): Install the skyctl binary
- [Authenticate](https://docs.test/start/auth/index.md): Log in to the control plane

## Compute
- [Autoscaling](https://docs.test/compute/autoscaling.md): Scale worker counts
- [Instance pools](https://docs.test/compute/pools.md): Keep idle instances warm

## Networking
- [Firewalls](https://docs.test/net/firewalls.md)
- [Missing page](https://docs.test/net/missing.md): Page that is not served
";

/// Number of bullet entries in [`MANIFEST`].
pub const ENTRY_COUNT: usize = 6;

pub fn pages() -> HashMap<String, String> {
    HashMap::from([
        (
            "https://docs.test/start/install.md".to_string(),
            format!("{:-<100}", "Download the release archive and put skyctl on your PATH."),
        ),
        (
            "https://docs.test/start/auth/".to_string(),
            "Run skyctl login to obtain a session token.".to_string(),
        ),
        (
            "https://docs.test/compute/autoscaling.md".to_string(),
            "Clusters add workers under load and remove them when idle.".to_string(),
        ),
        (
            "https://docs.test/compute/pools.md".to_string(),
            "Pools cut autoscaling latency by keeping machines warm.".to_string(),
        ),
        (
            "https://docs.test/net/firewalls.md".to_string(),
            format!("{:x<600}", "Ingress rules control which ports accept traffic "),
        ),
    ])
}

pub fn config() -> DocsConfig {
    DocsConfig {
        manifest_url: MANIFEST_URL.to_string(),
        fetch_concurrency: 3,
        ..DocsConfig::default()
    }
}

/// Serves [`MANIFEST`] and [`pages`], counting every fetch.
pub struct StaticSource {
    manifest: Mutex<String>,
    pages: Mutex<HashMap<String, String>>,
    delay: Duration,
    manifest_failures: AtomicUsize,
    manifest_fetches: AtomicUsize,
    page_fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::with_manifest(MANIFEST)
    }

    pub fn with_manifest(manifest: &str) -> Self {
        Self {
            manifest: Mutex::new(manifest.to_string()),
            pages: Mutex::new(pages()),
            delay: Duration::from_millis(5),
            manifest_failures: AtomicUsize::new(0),
            manifest_fetches: AtomicUsize::new(0),
            page_fetches: AtomicUsize::new(0),
        }
    }

    /// Fail the next `count` manifest fetches with a 503.
    pub fn failing_manifest(self, count: usize) -> Self {
        self.manifest_failures.store(count, Ordering::SeqCst);
        self
    }

    pub fn set_page(&self, url: &str, content: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), content.to_string());
    }

    pub fn manifest_fetches(&self) -> usize {
        self.manifest_fetches.load(Ordering::SeqCst)
    }

    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        tokio::time::sleep(self.delay).await;

        if url == MANIFEST_URL {
            self.manifest_fetches.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .manifest_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            let manifest = self.manifest.lock().unwrap().clone();
            return Ok(manifest);
        }

        self.page_fetches.fetch_add(1, Ordering::SeqCst);
        let page = self.pages.lock().unwrap().get(url).cloned();
        page.ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: StatusCode::NOT_FOUND,
        })
    }
}
