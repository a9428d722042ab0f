//! Lifecycle of the in-memory documentation index.
//!
//! The index starts absent. The first [`DocsIndex::search`] (or an explicit
//! [`DocsIndex::ensure_indexed`]) fetches the manifest and every page it lists,
//! builds the index and publishes it. Concurrency rules:
//!
//! - builds, rebuilds and teardowns hold the write lock, so at most one runs;
//! - queries hold the read lock only long enough to clone the published index,
//!   then search it without any lock;
//! - an index is published only after it is fully committed, and a failed
//!   build publishes nothing;
//! - a query that arrives while a build or rebuild is running waits for it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use super::query::{DocumentationResult, execute};
use super::schema::SearchIndex;
use crate::catalog::{CatalogEntry, parse_catalog_with_base};
use crate::config::DocsConfig;
use crate::error::{DocsError, Result};
use crate::fetch::{ContentSource, HttpFetcher};
use crate::materialize::materialize;
use crate::timer::Timer;

/// Snapshot of the index lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Whether an index is currently published.
    pub present: bool,
    /// Successful builds performed by this handle so far.
    pub generation: u64,
    /// Documents in the published index, 0 when absent.
    pub documents: u64,
}

/// Shared handle to the lazily built documentation index.
///
/// Construct one per process (or per test) and share it through an `Arc`.
pub struct DocsIndex<S = HttpFetcher> {
    source: S,
    manifest_url: String,
    fetch_concurrency: usize,
    state: RwLock<Option<Arc<SearchIndex>>>,
    generation: AtomicU64,
}

impl DocsIndex<HttpFetcher> {
    /// Index backed by HTTP, configured from `config`.
    pub fn new(config: &DocsConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::with_source(fetcher, config))
    }
}

impl<S: ContentSource> DocsIndex<S> {
    /// Index reading the manifest and pages through `source`.
    pub fn with_source(source: S, config: &DocsConfig) -> Self {
        Self {
            source,
            manifest_url: config.manifest_url.clone(),
            fetch_concurrency: config.fetch_concurrency.max(1),
            state: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Content source used for the manifest and pages.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Manifest this index is built from.
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Fetch and parse the manifest without building anything.
    pub async fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        let manifest = self
            .source
            .fetch(&self.manifest_url)
            .await
            .map_err(|source| DocsError::Manifest {
                url: self.manifest_url.clone(),
                source,
            })?;

        let base = Url::parse(&self.manifest_url).ok();
        Ok(parse_catalog_with_base(&manifest, base.as_ref()))
    }

    /// Build the index unless it is already present.
    pub async fn ensure_indexed(&self) -> Result<()> {
        self.ready().await.map(|_| ())
    }

    /// Drop the index. Does nothing when it is already absent.
    pub async fn teardown(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if state.take().is_some() {
            info!("Documentation index torn down");
        } else {
            debug!("Documentation index already absent");
        }
        Ok(())
    }

    /// Replace the index with a freshly built one.
    ///
    /// Runs under a single write lock: concurrent queries wait for the new
    /// index instead of observing an absent one. On failure the index is left
    /// absent and the next query triggers a full build.
    pub async fn rebuild(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.take();
        let built = self.build().await?;
        *state = Some(Arc::new(built));
        Ok(())
    }

    /// Top `limit` documents for `query`, best first. Builds the index first
    /// if needed.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<DocumentationResult>> {
        let index = self.ready().await?;
        let results = execute(&index, query, limit)?;
        info!(query, limit, results = results.len(), "Documentation search");
        Ok(results)
    }

    /// Current lifecycle state.
    pub async fn stats(&self) -> IndexStats {
        let state = self.state.read().await;
        IndexStats {
            present: state.is_some(),
            generation: self.generation(),
            documents: state.as_ref().map_or(0, |index| index.num_docs()),
        }
    }

    /// Successful builds performed so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// The published index, building it first when absent.
    async fn ready(&self) -> Result<Arc<SearchIndex>> {
        {
            let state = self.state.read().await;
            if let Some(index) = state.as_ref() {
                return Ok(Arc::clone(index));
            }
        }

        debug!("Documentation index absent, acquiring write lock");
        let mut state = self.state.write().await;
        // Another caller may have finished a build while we waited.
        if let Some(index) = state.as_ref() {
            debug!("Documentation index built by a concurrent caller");
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(self.build().await?);
        *state = Some(Arc::clone(&index));
        Ok(index)
    }

    /// Manifest → catalog → documents → committed index. Must be called with
    /// the write lock held.
    async fn build(&self) -> Result<SearchIndex> {
        let timer = Timer::start("docs_index_build");
        info!(manifest = %self.manifest_url, "Building documentation index");

        let entries = self.catalog().await?;
        timer.lap(&format!("Parsed {} catalog entries", entries.len()));

        let documents = materialize(&self.source, entries, self.fetch_concurrency).await;
        let index = SearchIndex::build(&documents)?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            generation,
            documents = documents.len(),
            "Documentation index ready"
        );
        timer.finish();
        Ok(index)
    }
}

impl<S> fmt::Debug for DocsIndex<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocsIndex")
            .field("manifest_url", &self.manifest_url)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}
