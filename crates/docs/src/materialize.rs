//! Turning catalog entries into indexable documents.

use futures_util::stream::{self, StreamExt};
use serde::Serialize;

use crate::catalog::CatalogEntry;
use crate::fetch::ContentSource;
use crate::timer::Timer;

/// A fully fetched documentation page, ready for indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Position in the catalog of the build that produced it.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Normalized page URL.
    pub url: String,
    /// Short description from the manifest.
    pub description: String,
    /// Manifest section.
    pub section: String,
    /// Page body, or a description of why it could not be fetched.
    pub content: String,
}

/// Fetch every entry's page, at most `concurrency` at a time.
///
/// A page that cannot be fetched still yields a document whose content
/// describes the failure. Output order and ids follow `entries`.
pub async fn materialize<S>(
    source: &S,
    entries: Vec<CatalogEntry>,
    concurrency: usize,
) -> Vec<Document>
where
    S: ContentSource,
{
    let timer = Timer::start("materialize");
    let total = entries.len();

    let fetched: Vec<(CatalogEntry, String)> = stream::iter(entries)
        .map(|entry| async move {
            let content = match source.fetch(&entry.url).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(url = %entry.url, error = %err, "Failed to fetch documentation page");
                    format!("Error fetching content: {err}")
                }
            };
            (entry, content)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let documents: Vec<Document> = fetched
        .into_iter()
        .enumerate()
        .map(|(id, (entry, content))| Document {
            id: id.to_string(),
            title: entry.title,
            url: entry.url,
            description: entry.description,
            section: entry.section,
            content,
        })
        .collect();

    timer.lap(&format!("Fetched {total} documentation pages"));
    timer.finish();
    documents
}
