use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::AppState;
use crate::storage::CatalogStats;

/// `GET /api/v1/status`
pub async fn status_handler() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// `GET /api/v1/stats`: record count per kind.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.catalog.stats())
}
