//! Places, nested under their city for listing and creation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hbnb_core::{NewPlace, Place, PlaceUpdate};
use serde_json::Value;
use tracing::info;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

/// `GET /cities/{city_id}/places`
pub async fn list_places(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Vec<Place>>, ApiError> {
    found(state.catalog.cities.get(&city_id))?;
    Ok(Json(state.catalog.places.list_by_parent(&city_id)))
}

/// `POST /cities/{city_id}/places`
///
/// Checks, in order: the city exists, the body is JSON, `user_id` is
/// present, the user exists, `name` is present.
pub async fn create_place(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Result<JsonBody<NewPlace>, ApiError>,
) -> Result<(StatusCode, Json<Place>), ApiError> {
    found(state.catalog.cities.get(&city_id))?;
    let JsonBody(payload) = body?;
    found(state.catalog.users.get(payload.user_id()?))?;

    let place = payload.build(&city_id, Utc::now())?;
    let place = state.catalog.places.insert(place).await?;
    info!(place_id = %place.id, city_id = %city_id, "place created");
    Ok((StatusCode::CREATED, Json(place)))
}

pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Place>, ApiError> {
    Ok(Json(found(state.catalog.places.get(&place_id))?))
}

pub async fn update_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Result<JsonBody<PlaceUpdate>, ApiError>,
) -> Result<Json<Place>, ApiError> {
    found(state.catalog.places.get(&place_id))?;
    let JsonBody(update) = body?;
    Ok(Json(found(
        state.catalog.places.update(&place_id, &update).await?,
    )?))
}

/// Also deletes the place's reviews.
pub async fn delete_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    deleted(state.catalog.delete_place(&place_id).await?)
}
