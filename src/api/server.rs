use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// GET /api/health - 健康检查
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "build_time": env!("BUILD_TIME"),
        "indexed": state.service.document_count(),
        "stats": state.service.stats(),
    }))
}
