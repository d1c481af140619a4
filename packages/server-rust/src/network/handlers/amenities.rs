//! `/amenities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hbnb_core::{Amenity, AmenityUpdate, NewAmenity};
use serde_json::Value;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

pub async fn list_amenities(State(state): State<AppState>) -> Json<Vec<Amenity>> {
    Json(state.catalog.amenities.list_all())
}

pub async fn get_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<Amenity>, ApiError> {
    Ok(Json(found(state.catalog.amenities.get(&amenity_id))?))
}

pub async fn create_amenity(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewAmenity>,
) -> Result<(StatusCode, Json<Amenity>), ApiError> {
    let amenity = state
        .catalog
        .amenities
        .insert(payload.build(Utc::now())?)
        .await?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

pub async fn update_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
    body: Result<JsonBody<AmenityUpdate>, ApiError>,
) -> Result<Json<Amenity>, ApiError> {
    found(state.catalog.amenities.get(&amenity_id))?;
    let JsonBody(update) = body?;
    Ok(Json(found(
        state.catalog.amenities.update(&amenity_id, &update).await?,
    )?))
}

/// Also unlinks the amenity from every place.
pub async fn delete_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    deleted(state.catalog.delete_amenity(&amenity_id).await?)
}
