//! Search module - path matching over a fixed set of paths / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - The index engine only exposes primitives: build_index, searcher, search, stored_field
//! - Query construction lives in `query`, orchestration in `service`
//! - Call direction: Service → Query → Engine (unidirectional) / 调用方向
//!
//! Search modes / 搜索模式：
//! - Substring: n-gram terms, supports abbreviations such as "lqdocspg" / 子串与缩写匹配
//! - Fuzzy: edit distance <= 2 per path segment and filename / 模糊匹配

pub mod concat_index;
pub mod engine;
pub mod query;
pub mod schema;
pub mod service;

pub use concat_index::{ConcatenatedEntry, ConcatenatedHit, ConcatenatedIndex};
pub use engine::{IndexEngine, IndexSearcher, IndexStats, MemoryIndex, ScoredDoc};
pub use query::{QueryStrategy, RetrievalRequest, SearchMode};
pub use schema::PathDocument;
pub use service::{PathSearchService, SearchSettings};
