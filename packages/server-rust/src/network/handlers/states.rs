//! `/states` resource.

use axum::extract::{Path, State as AxumState};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hbnb_core::{NewState, State, StateUpdate};
use serde_json::Value;
use tracing::info;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

pub async fn list_states(AxumState(state): AxumState<AppState>) -> Json<Vec<State>> {
    Json(state.catalog.states.list_all())
}

pub async fn get_state(
    AxumState(state): AxumState<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<State>, ApiError> {
    Ok(Json(found(state.catalog.states.get(&state_id))?))
}

pub async fn create_state(
    AxumState(state): AxumState<AppState>,
    JsonBody(payload): JsonBody<NewState>,
) -> Result<(StatusCode, Json<State>), ApiError> {
    let created = state.catalog.states.insert(payload.build(Utc::now())?).await?;
    info!(state_id = %created.id, "state created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_state(
    AxumState(state): AxumState<AppState>,
    Path(state_id): Path<String>,
    body: Result<JsonBody<StateUpdate>, ApiError>,
) -> Result<Json<State>, ApiError> {
    found(state.catalog.states.get(&state_id))?;
    let JsonBody(update) = body?;
    Ok(Json(found(
        state.catalog.states.update(&state_id, &update).await?,
    )?))
}

/// Cascades to the state's cities, their places and reviews.
pub async fn delete_state(
    AxumState(state): AxumState<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let existed = state.catalog.delete_state(&state_id).await?;
    if existed {
        info!(state_id = %state_id, "state deleted");
    }
    deleted(existed)
}
