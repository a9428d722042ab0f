//! Manifest (`llms.txt`) parsing.
//!
//! The grammar is line based:
//!
//! ```text
//! ## Section name
//! - [Title](https://host/path): Optional description
//! - [Title](relative/path/index.md)
//! ```
//!
//! Anything else is prose and is skipped.

use serde::Serialize;
use url::Url;

/// Canonical index page name; `…/guide/index.md` and `…/guide/` are the same page.
const INDEX_PAGE: &str = "index.md";

/// One link listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Link text.
    pub title: String,
    /// Normalized target URL.
    pub url: String,
    /// Text after the link, or the title when there is none.
    pub description: String,
    /// Nearest preceding `##` heading; empty before the first one.
    pub section: String,
}

/// Parse manifest text into catalog entries, in manifest order.
pub fn parse_catalog(manifest: &str) -> Vec<CatalogEntry> {
    parse_catalog_with_base(manifest, None)
}

/// Like [`parse_catalog`], resolving relative link targets against `base`
/// (normally the manifest URL).
pub fn parse_catalog_with_base(manifest: &str, base: Option<&Url>) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();
    let mut section = String::new();

    for line in manifest.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(heading) = line.strip_prefix("## ") {
            section = heading.trim().to_string();
            continue;
        }

        let Some(link) = parse_link_line(line) else {
            continue;
        };

        entries.push(CatalogEntry {
            title: link.title.to_string(),
            url: normalize_url(&resolve_url(link.url, base)),
            description: link.description.unwrap_or(link.title).to_string(),
            section: section.clone(),
        });
    }

    tracing::debug!(entries = entries.len(), "Parsed documentation catalog");
    entries
}

struct LinkLine<'a> {
    title: &'a str,
    url: &'a str,
    description: Option<&'a str>,
}

/// `- [Title](URL)` with an optional `: Description` tail.
fn parse_link_line(line: &str) -> Option<LinkLine<'_>> {
    let rest = line.strip_prefix("- [")?;
    let (title, rest) = rest.split_once("](")?;
    let (url, tail) = rest.split_once(')')?;

    let title = title.trim();
    let url = url.trim();
    if title.is_empty() || url.is_empty() {
        return None;
    }

    let tail = tail.trim();
    let description = if tail.is_empty() {
        None
    } else {
        let text = tail.strip_prefix(':')?.trim();
        (!text.is_empty()).then_some(text)
    };

    Some(LinkLine {
        title,
        url,
        description,
    })
}

fn resolve_url(url: &str, base: Option<&Url>) -> String {
    if Url::parse(url).is_ok() {
        return url.to_string();
    }
    match base.map(|b| b.join(url)) {
        Some(Ok(joined)) => joined.to_string(),
        _ => url.to_string(),
    }
}

/// Strip a trailing `/index.md` down to the directory URL.
pub fn normalize_url(url: &str) -> String {
    match url.strip_suffix(INDEX_PAGE) {
        Some(dir) if dir.ends_with('/') => dir.to_string(),
        _ => url.to_string(),
    }
}
