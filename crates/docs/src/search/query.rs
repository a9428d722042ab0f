//! Weighted multi-field query execution.
//!
//! A free-text query is analyzed once per field and turned into a disjunction
//! of four boosted per-field matches:
//!
//! | field | boost |
//! |-------|-------|
//! | `title` | [`TITLE_BOOST`] |
//! | `section` | [`SECTION_BOOST`] |
//! | `description` | [`DESCRIPTION_BOOST`] |
//! | `content` | [`CONTENT_BOOST`] |
//!
//! Within a field any query term may match.

use serde::Serialize;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, TantivyDocument, Term};

use super::schema::SearchIndex;

/// Boost for matches in the page title.
pub const TITLE_BOOST: f32 = 3.0;
/// Boost for matches in the manifest section name.
pub const SECTION_BOOST: f32 = 2.0;
/// Boost for matches in the manifest description.
pub const DESCRIPTION_BOOST: f32 = 1.5;
/// Boost for matches in the page body.
pub const CONTENT_BOOST: f32 = 1.0;

// A title hit must never weigh less than a section hit, and so on down.
const _: () = assert!(
    TITLE_BOOST >= SECTION_BOOST
        && SECTION_BOOST >= DESCRIPTION_BOOST
        && DESCRIPTION_BOOST >= CONTENT_BOOST
        && CONTENT_BOOST > 0.0
);

/// Characters of page content kept in a result.
pub const MAX_CONTENT_CHARS: usize = 500;
/// Appended to content cut at [`MAX_CONTENT_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentationResult {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Manifest description.
    pub description: String,
    /// Manifest section.
    pub section: String,
    /// Page content, truncated for display.
    pub content: String,
    /// Relevance; only meaningful relative to other hits of the same query.
    pub score: f32,
}

/// Cut `content` to [`MAX_CONTENT_CHARS`] characters, marking the cut.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &content[..cut]),
        None => content.to_string(),
    }
}

/// Run `text` against the index and return at most `limit` hits, best first.
pub(super) fn execute(
    index: &SearchIndex,
    text: &str,
    limit: usize,
) -> tantivy::Result<Vec<DocumentationResult>> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let Some(query) = build_query(index, text)? else {
        tracing::debug!(query = text, "Query has no searchable terms");
        return Ok(Vec::new());
    };

    let searcher = index.reader.searcher();
    let top_docs = searcher.search(query.as_ref(), &TopDocs::with_limit(limit))?;

    let mut results = Vec::with_capacity(top_docs.len());
    for (score, address) in top_docs {
        if score <= 0.0 {
            continue;
        }
        let doc: TantivyDocument = searcher.doc(address)?;
        results.push(to_result(index, &doc, score));
    }
    Ok(results)
}

fn build_query(index: &SearchIndex, text: &str) -> tantivy::Result<Option<Box<dyn Query>>> {
    let fields = &index.fields;
    let weighted = [
        (fields.title, TITLE_BOOST),
        (fields.section, SECTION_BOOST),
        (fields.description, DESCRIPTION_BOOST),
        (fields.content, CONTENT_BOOST),
    ];

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::with_capacity(weighted.len());
    for (field, boost) in weighted {
        if let Some(matches) = field_match(&index.index, field, text)? {
            let boosted: Box<dyn Query> = Box::new(BoostQuery::new(matches, boost));
            clauses.push((Occur::Should, boosted));
        }
    }

    if clauses.is_empty() {
        return Ok(None);
    }
    let query: Box<dyn Query> = Box::new(BooleanQuery::new(clauses));
    Ok(Some(query))
}

/// Any of the analyzed terms of `text` in `field`.
fn field_match(
    index: &Index,
    field: Field,
    text: &str,
) -> tantivy::Result<Option<Box<dyn Query>>> {
    let mut analyzer = index.tokenizer_for_field(field)?;
    let mut stream = analyzer.token_stream(text);

    let mut terms: Vec<Term> = Vec::new();
    while stream.advance() {
        let term = Term::from_field_text(field, &stream.token().text);
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    if terms.is_empty() {
        return Ok(None);
    }

    let clauses: Vec<(Occur, Box<dyn Query>)> = terms
        .into_iter()
        .map(|term| {
            let query: Box<dyn Query> =
                Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
            (Occur::Should, query)
        })
        .collect();
    let query: Box<dyn Query> = Box::new(BooleanQuery::new(clauses));
    Ok(Some(query))
}

fn to_result(index: &SearchIndex, doc: &TantivyDocument, score: f32) -> DocumentationResult {
    let text = |field: Field| {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let fields = &index.fields;

    DocumentationResult {
        title: text(fields.title),
        url: text(fields.url),
        description: text(fields.description),
        section: text(fields.section),
        content: truncate_content(&text(fields.content)),
        score,
    }
}
