//! Path search service - the search facade / 路径搜索服务
//!
//! Owns the index engine and the query strategy. The index is built once
//! during construction; afterwards the service is read-only and can be
//! shared across threads. / 构造时一次性建立索引，之后只读，可跨线程共享

use std::collections::HashSet;

use crate::analysis::NGramPolicy;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};

use super::engine::{IndexEngine, IndexStats, MemoryIndex};
use super::query::{QueryStrategy, SearchMode};
use super::schema::{PathDocument, PATH_FIELD};

/// Search settings / 搜索参数
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub ngram: NGramPolicy,
    pub max_edits: u8,
    pub top_k: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        let (min_gram, max_gram) = config.effective_gram_range();
        Self {
            ngram: NGramPolicy::new(min_gram, max_gram),
            max_edits: config.effective_max_edits(),
            top_k: config.top_k,
        }
    }
}

pub struct PathSearchService<E: IndexEngine = MemoryIndex> {
    engine: E,
    strategy: QueryStrategy,
    top_k: usize,
    stats: IndexStats,
}

impl PathSearchService<MemoryIndex> {
    /// Build an in-memory index over `paths` / 基于内存索引创建服务
    pub fn new<I, P>(paths: I, settings: SearchSettings) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self::with_engine(MemoryIndex::new(), paths, settings)
    }
}

impl<E: IndexEngine> PathSearchService<E> {
    /// Index `paths` into `engine` and wrap it / 使用指定引擎建立索引
    ///
    /// Empty and duplicate paths are skipped so every path is indexed once.
    pub fn with_engine<I, P>(engine: E, paths: I, settings: SearchSettings) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut documents = Vec::new();

        for path in paths {
            let path: String = path.into();
            if path.is_empty() {
                tracing::warn!("Skipping empty path");
                continue;
            }
            if !seen.insert(path.clone()) {
                tracing::warn!("Skipping duplicate path: {}", path);
                continue;
            }
            documents.push(PathDocument::new(path).to_index_document(&settings.ngram));
        }

        let stats = engine.build_index(documents)?;
        tracing::info!("Indexed {} file paths", stats.document_count);

        Ok(Self {
            engine,
            strategy: QueryStrategy::new(settings.ngram, settings.max_edits),
            top_k: settings.top_k,
            stats,
        })
    }

    /// Search with the boolean mode flag used by the HTTP layer / 搜索（fuzzy 为模式开关）
    pub fn search(&self, query: &str, fuzzy: bool) -> Result<Vec<String>> {
        self.search_with_mode(query, SearchMode::from_fuzzy(fuzzy))
    }

    /// Ranked paths for `query`, at most `top_k` / 返回按相关性排序的路径
    pub fn search_with_mode(&self, query: &str, mode: SearchMode) -> Result<Vec<String>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.strategy.build(query, mode)?;
        tracing::debug!(
            "Searching for: {}, mode: {:?}, clauses: {}",
            query,
            mode,
            request.clauses().len()
        );

        let searcher = self.engine.searcher()?;
        let hits = searcher.search(&request, self.top_k)?;

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits {
            let path = searcher.stored_field(hit.doc, PATH_FIELD)?.ok_or_else(|| {
                SearchError::EngineUnavailable(format!("document {} has no stored path", hit.doc))
            })?;
            results.push(path);
        }

        Ok(results)
    }

    pub fn document_count(&self) -> usize {
        self.stats.document_count
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }
}
