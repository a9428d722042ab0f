//! In-memory full-text search over the documentation catalog.
//!
//! - `schema` - field mapping and index construction (Tantivy, RAM directory)
//! - `query` - weighted multi-field query and result assembly
//! - `docs_index` - [`DocsIndex`], the lazily built, rebuildable index handle

mod docs_index;
mod query;
mod schema;

pub use docs_index::{DocsIndex, IndexStats};
pub use query::{
    CONTENT_BOOST, DESCRIPTION_BOOST, DocumentationResult, MAX_CONTENT_CHARS, SECTION_BOOST,
    TITLE_BOOST, TRUNCATION_MARKER, truncate_content,
};
