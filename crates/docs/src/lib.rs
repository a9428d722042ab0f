//! Embedded documentation search for skyctl.
//!
//! The documentation site publishes a manifest (`llms.txt`) listing every page
//! as a `- [Title](URL): Description` bullet grouped under `## Section`
//! headings. This crate fetches that manifest and every page it links to,
//! builds an in-memory full-text index over them on first use and answers
//! weighted multi-field queries against it.
//!
//! The entry point is [`DocsIndex`]; share one instance (behind an `Arc`)
//! between every caller that searches.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod materialize;
pub mod search;
pub mod timer;

pub use catalog::{CatalogEntry, parse_catalog};
pub use config::DocsConfig;
pub use error::{DocsError, FetchError, Result};
pub use fetch::{ContentSource, HttpFetcher, RetryPolicy};
pub use materialize::{Document, materialize};
pub use search::{DocsIndex, DocumentationResult, IndexStats};
