//! Field mapping and construction of the Tantivy index.

use std::fmt;

use tantivy::schema::{Field, STORED, STRING, Schema, TEXT};
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, doc};

use crate::materialize::Document;
use crate::timer::Timer;

/// Indexing arena for the single writer thread.
const WRITER_MEMORY_BYTES: usize = 50_000_000;

/// Handles to the schema fields of a documentation index.
#[derive(Debug, Clone, Copy)]
pub(super) struct DocFields {
    pub(super) id: Field,
    pub(super) title: Field,
    pub(super) url: Field,
    pub(super) description: Field,
    pub(super) section: Field,
    pub(super) content: Field,
}

impl DocFields {
    /// `id` and `url` are stored keywords; the four searchable fields are
    /// analyzed with the default tokenizer and stored for display.
    fn schema() -> (Schema, Self) {
        let mut builder = Schema::builder();
        let fields = Self {
            id: builder.add_text_field("id", STRING | STORED),
            title: builder.add_text_field("title", TEXT | STORED),
            url: builder.add_text_field("url", STRING | STORED),
            description: builder.add_text_field("description", TEXT | STORED),
            section: builder.add_text_field("section", TEXT | STORED),
            content: builder.add_text_field("content", TEXT | STORED),
        };
        (builder.build(), fields)
    }
}

/// One committed, read-only generation of the documentation index.
pub(super) struct SearchIndex {
    pub(super) index: Index,
    pub(super) reader: IndexReader,
    pub(super) fields: DocFields,
}

impl SearchIndex {
    /// Index every document in one batch and commit.
    ///
    /// The returned value is complete: readers never see a partial batch.
    pub(super) fn build(documents: &[Document]) -> tantivy::Result<Self> {
        let timer = Timer::start("build_search_index");
        let (schema, fields) = DocFields::schema();
        let index = Index::create_in_ram(schema);

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_MEMORY_BYTES)?;
        for document in documents {
            writer.add_document(doc!(
                fields.id => document.id.as_str(),
                fields.title => document.title.as_str(),
                fields.url => document.url.as_str(),
                fields.description => document.description.as_str(),
                fields.section => document.section.as_str(),
                fields.content => document.content.as_str()
            ))?;
        }
        writer.commit()?;
        writer.wait_merging_threads()?;
        timer.lap(&format!("Indexed {} documents", documents.len()));

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        timer.finish();

        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    pub(super) fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("num_docs", &self.num_docs())
            .finish()
    }
}
