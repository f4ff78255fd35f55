//! Concatenated-field index / 拼接字段索引
//!
//! Each entry gets a `concatenated` field: title and content run through the
//! concatenation analyzer, stop words removed, indexed as a single term.
//! Queries go through the same analyzer and match that term exactly.

use crate::analysis::ConcatenationAnalyzer;
use crate::error::Result;

use super::engine::{IndexEngine, MemoryIndex};
use super::query::{Clause, RetrievalRequest};
use super::schema::IndexDocument;

pub const ID_FIELD: &str = "id";
pub const TITLE_FIELD: &str = "title";
pub const BODY_FIELD: &str = "content";
pub const CONCATENATED_FIELD: &str = "concatenated";

const TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatenatedEntry {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl ConcatenatedEntry {
    pub fn new(id: &str, title: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    /// Text fed into the concatenated field / 拼接字段的原始文本
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.content)
    }
}

#[derive(Debug, Clone)]
pub struct ConcatenatedHit {
    pub id: String,
    pub title: String,
    pub content: String,
    pub concatenated: String,
    pub score: f32,
}

/// Built-in sample corpus / 内置示例数据
pub fn sample_entries() -> Vec<ConcatenatedEntry> {
    vec![
        ConcatenatedEntry::new(
            "1",
            "Introduction to Lucene",
            "Lucene is a powerful search library for Java applications.",
        ),
        ConcatenatedEntry::new(
            "2",
            "Advanced Lucene Indexing",
            "This article explains how to use custom analyzers and filters in Lucene.",
        ),
        ConcatenatedEntry::new(
            "3",
            "Searching with Lucene",
            "Learn how to perform efficient searches using Lucene's query parser.",
        ),
    ]
}

pub struct ConcatenatedIndex<E: IndexEngine = MemoryIndex> {
    engine: E,
    analyzer: ConcatenationAnalyzer,
}

impl ConcatenatedIndex<MemoryIndex> {
    pub fn new(entries: Vec<ConcatenatedEntry>, analyzer: ConcatenationAnalyzer) -> Result<Self> {
        Self::with_engine(MemoryIndex::new(), entries, analyzer)
    }

    /// Index over [`sample_entries`] with the default analyzer / 示例索引
    pub fn sample() -> Result<Self> {
        Self::new(sample_entries(), ConcatenationAnalyzer::new())
    }
}

impl<E: IndexEngine> ConcatenatedIndex<E> {
    pub fn with_engine(
        engine: E,
        entries: Vec<ConcatenatedEntry>,
        analyzer: ConcatenationAnalyzer,
    ) -> Result<Self> {
        let documents = entries
            .iter()
            .map(|entry| Self::to_document(&analyzer, entry))
            .collect();

        let stats = engine.build_index(documents)?;
        tracing::info!("Indexed {} concatenated documents", stats.document_count);

        Ok(Self { engine, analyzer })
    }

    fn to_document(analyzer: &ConcatenationAnalyzer, entry: &ConcatenatedEntry) -> IndexDocument {
        let combined = entry.combined_text();
        IndexDocument::new()
            .store(ID_FIELD, entry.id.clone())
            .index(ID_FIELD, vec![entry.id.clone()])
            .store(TITLE_FIELD, entry.title.clone())
            .index(TITLE_FIELD, analyzer.analyze(&entry.title))
            .store(BODY_FIELD, entry.content.clone())
            .index(BODY_FIELD, analyzer.analyze(&entry.content))
            .index(CONCATENATED_FIELD, analyzer.analyze(&combined))
            .store(CONCATENATED_FIELD, combined)
    }

    /// Exact match on the concatenated term / 按拼接词项精确匹配
    pub fn search_concatenated(&self, query: &str) -> Result<Vec<ConcatenatedHit>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let Some(term) = self.analyzer.analyze_single(query) else {
            tracing::debug!("Query {:?} has no terms after stop-word removal", query);
            return Ok(Vec::new());
        };

        let mut request = RetrievalRequest::new();
        request.should(Clause::term(CONCATENATED_FIELD, term));

        let searcher = self.engine.searcher()?;
        let hits = searcher.search(&request, TOP_K)?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let field = |name: &str| -> Result<String> {
                Ok(searcher.stored_field(hit.doc, name)?.unwrap_or_default())
            };
            results.push(ConcatenatedHit {
                id: field(ID_FIELD)?,
                title: field(TITLE_FIELD)?,
                content: field(BODY_FIELD)?,
                concatenated: field(CONCATENATED_FIELD)?,
                score: hit.score,
            });
        }
        Ok(results)
    }
}
