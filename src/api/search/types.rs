use serde::{Deserialize, Serialize};

/// 搜索请求 / search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub fuzzy: bool,
}

/// 拼接字段搜索请求
#[derive(Debug, Deserialize)]
pub struct ConcatenatedParams {
    pub query: String,
}

/// 拼接字段搜索结果项
#[derive(Debug, Serialize)]
pub struct ConcatenatedItem {
    pub id: String,
    pub title: String,
    pub score: f32,
}
