use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::ApiError;
use crate::state::AppState;
use super::types::*;

/// GET /search - 路径搜索，返回路径数组
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    tracing::info!("Searching for: {}, fuzzy: {}", params.query, params.fuzzy);

    let results = state
        .service
        .search(&params.query, params.fuzzy)
        .map_err(|e| {
            tracing::error!("Error searching for '{}': {}", params.query, e);
            ApiError::from(e)
        })?;

    Ok(Json(results))
}

/// GET /search/concatenated - 拼接字段示例索引搜索
pub async fn search_concatenated(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConcatenatedParams>,
) -> Result<Json<Vec<ConcatenatedItem>>, ApiError> {
    let hits = state
        .concatenated
        .search_concatenated(&params.query)
        .map_err(|e| {
            tracing::error!("Error searching concatenated index for '{}': {}", params.query, e);
            ApiError::from(e)
        })?;

    let items = hits
        .into_iter()
        .map(|h| ConcatenatedItem {
            id: h.id,
            title: h.title,
            score: h.score,
        })
        .collect();
    Ok(Json(items))
}
