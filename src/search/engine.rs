//! Index engine - in-memory inverted index / 索引引擎
//!
//! Architecture principle: only expose primitive operations, do not control flow / 架构原则
//! - build_index: one-shot build, replaces any prior index / 一次性构建索引
//! - searcher: short-lived read handle over a built index / 只读检索句柄
//! - search: rank documents for a retrieval request / 检索
//! - stored_field: fetch a stored value for a hit / 读取存储字段

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::error::{Result, SearchError};

use super::query::{Clause, MatchKind, RetrievalRequest};
use super::schema::IndexDocument;

/// Internal document number, assigned in build order / 文档编号
pub type DocRef = u32;

/// A matched document with its relevance score / 命中文档及其分数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub doc: DocRef,
    pub score: f32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub term_count: usize,
    pub last_updated: Option<i64>,
}

/// Index engine contract consumed by the search facade / 索引引擎接口
pub trait IndexEngine: Send + Sync {
    /// Build the index from scratch / 从头构建索引
    fn build_index(&self, documents: Vec<IndexDocument>) -> Result<IndexStats>;

    /// Open a read handle; released when dropped / 打开只读句柄，drop 时释放
    fn searcher(&self) -> Result<Box<dyn IndexSearcher>>;
}

pub trait IndexSearcher: Send {
    /// Top `limit` documents, highest score first / 返回分数最高的 `limit` 个文档
    fn search(&self, request: &RetrievalRequest, limit: usize) -> Result<Vec<ScoredDoc>>;

    fn stored_field(&self, doc: DocRef, field: &str) -> Result<Option<String>>;
}

/// Inverted index entry / 倒排索引条目
#[derive(Debug, Clone)]
struct PostingEntry {
    doc: DocRef,
    freq: u32,
}

/// Immutable snapshot produced by one build / 一次构建产生的不可变快照
#[derive(Debug, Default)]
struct Segment {
    /// Stored fields per document / 每个文档的存储字段
    stored: Vec<HashMap<String, String>>,
    /// field -> term -> postings / 字段 -> 词项 -> 倒排表
    fields: HashMap<String, HashMap<String, Vec<PostingEntry>>>,
    stats: IndexStats,
}

impl Segment {
    fn build(documents: Vec<IndexDocument>) -> Result<Self> {
        let mut segment = Segment::default();

        for (doc, document) in documents.into_iter().enumerate() {
            let doc = doc_ref(doc)?;

            for (field, terms) in document.indexed {
                let mut freqs: HashMap<String, u32> = HashMap::new();
                for term in terms {
                    *freqs.entry(term).or_default() += 1;
                }

                let postings = segment.fields.entry(field).or_default();
                for (term, freq) in freqs {
                    postings.entry(term).or_default().push(PostingEntry { doc, freq });
                }
            }

            segment.stored.push(document.stored);
        }

        segment.stats = IndexStats {
            document_count: segment.stored.len(),
            term_count: segment.fields.values().map(HashMap::len).sum(),
            last_updated: Some(chrono::Utc::now().timestamp()),
        };
        Ok(segment)
    }

    fn idf(&self, doc_freq: usize) -> f32 {
        let n = self.stored.len() as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Per-document contribution of one clause / 单个子句对各文档的得分贡献
    fn score_clause(&self, clause: &Clause) -> HashMap<DocRef, f32> {
        let mut contributions = HashMap::new();
        let Some(terms) = self.fields.get(&clause.field) else {
            return contributions;
        };

        match clause.kind {
            MatchKind::Term => {
                if let Some(postings) = terms.get(&clause.term) {
                    let idf = self.idf(postings.len());
                    for posting in postings {
                        contributions.insert(posting.doc, idf * tf_weight(posting.freq));
                    }
                }
            }
            MatchKind::Fuzzy { max_edits } => {
                let query: Vec<char> = clause.term.chars().collect();
                for (term, postings) in terms {
                    let Some(similarity) = fuzzy_similarity(&query, term, max_edits as usize)
                    else {
                        continue;
                    };
                    let weight = similarity * self.idf(postings.len());
                    for posting in postings {
                        let weight = weight * tf_weight(posting.freq);
                        let best = contributions.entry(posting.doc).or_insert(0.0);
                        if weight > *best {
                            *best = weight;
                        }
                    }
                }
            }
        }

        contributions
    }

    fn search(&self, request: &RetrievalRequest, limit: usize) -> Vec<ScoredDoc> {
        let mut scores: HashMap<DocRef, f32> = HashMap::new();
        for clause in request.clauses() {
            for (doc, score) in self.score_clause(clause) {
                *scores.entry(doc).or_default() += score;
            }
        }

        let mut hits: Vec<ScoredDoc> = scores
            .into_iter()
            .map(|(doc, score)| ScoredDoc { doc, score })
            .collect();

        // 按分数排序，同分按文档顺序
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.doc.cmp(&b.doc))
        });
        hits.truncate(limit);
        hits
    }
}

/// In-memory index engine / 内存索引引擎
pub struct MemoryIndex {
    segment: RwLock<Option<Arc<Segment>>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self {
            segment: RwLock::new(None),
        }
    }

    /// Get index statistics / 获取索引统计信息
    pub fn stats(&self) -> IndexStats {
        self.segment
            .read()
            .as_ref()
            .map(|s| s.stats.clone())
            .unwrap_or_default()
    }

    pub fn document_count(&self) -> usize {
        self.stats().document_count
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexEngine for MemoryIndex {
    fn build_index(&self, documents: Vec<IndexDocument>) -> Result<IndexStats> {
        let segment = Segment::build(documents)?;
        let stats = segment.stats.clone();

        *self.segment.write() = Some(Arc::new(segment));

        tracing::debug!(
            "Index built: {} documents, {} terms",
            stats.document_count,
            stats.term_count
        );
        Ok(stats)
    }

    fn searcher(&self) -> Result<Box<dyn IndexSearcher>> {
        let segment = self
            .segment
            .read()
            .clone()
            .ok_or_else(|| SearchError::EngineUnavailable("index has not been built".to_string()))?;

        Ok(Box::new(MemorySearcher { segment }))
    }
}

/// Read handle pinned to one segment snapshot / 固定在某个快照上的只读句柄
struct MemorySearcher {
    segment: Arc<Segment>,
}

impl IndexSearcher for MemorySearcher {
    fn search(&self, request: &RetrievalRequest, limit: usize) -> Result<Vec<ScoredDoc>> {
        Ok(self.segment.search(request, limit))
    }

    fn stored_field(&self, doc: DocRef, field: &str) -> Result<Option<String>> {
        let stored = self.segment.stored.get(doc as usize).ok_or_else(|| {
            SearchError::EngineUnavailable(format!("document {} is not in the index", doc))
        })?;
        Ok(stored.get(field).cloned())
    }
}

/// Document number for the `index`-th built document / 文档编号转换
fn doc_ref(index: usize) -> Result<DocRef> {
    DocRef::try_from(index).map_err(|_| {
        SearchError::EngineUnavailable(format!("too many documents: {} exceeds {}", index, DocRef::MAX))
    })
}

fn tf_weight(freq: u32) -> f32 {
    1.0 + (freq.max(1) as f32).ln()
}

/// Similarity of a fuzzy match, `None` when the term is out of reach / 模糊匹配相似度
///
/// Accepts distances up to `max_distance` that are also shorter than the
/// shorter term; similarity is `1 - distance / min_len`.
fn fuzzy_similarity(query: &[char], term: &str, max_distance: usize) -> Option<f32> {
    let term: Vec<char> = term.chars().collect();
    let min_len = query.len().min(term.len());

    // 长度差太大直接返回
    if query.len().abs_diff(term.len()) > max_distance || min_len == 0 {
        return None;
    }

    let distance = edit_distance(query, &term);
    if distance > max_distance || distance >= min_len {
        return None;
    }

    Some(1.0 - distance as f32 / min_len as f32)
}

/// Optimal string alignment distance (Levenshtein + adjacent transposition) / 编辑距离（含相邻换位）
fn edit_distance(s1: &[char], s2: &[char]) -> usize {
    let len1 = s1.len();
    let len2 = s2.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0usize; len2 + 1]; len1 + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1[i - 1] == s2[j - 1] { 0 } else { 1 };
            let mut best = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && s1[i - 1] == s2[j - 2] && s1[i - 2] == s2[j - 1] {
                best = best.min(matrix[i - 2][j - 2] + 1);
            }
            matrix[i][j] = best;
        }
    }

    matrix[len1][len2]
}
