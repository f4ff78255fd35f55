//! Search error types / 搜索错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Query text could not be parsed into a retrieval request / 查询语法错误
    #[error("query syntax error: {0}")]
    QuerySyntax(String),

    /// Index engine is not built or a resource is unavailable / 索引引擎不可用
    #[error("index engine unavailable: {0}")]
    EngineUnavailable(String),
}

impl SearchError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::QuerySyntax(_) => "QUERY_SYNTAX",
            Self::EngineUnavailable(_) => "ENGINE_UNAVAILABLE",
        }
    }
}
