//! Cities, nested under their state for listing and creation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hbnb_core::{City, CityUpdate, NewCity};
use serde_json::Value;
use tracing::info;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

/// `GET /states/{state_id}/cities`
pub async fn list_cities(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<City>>, ApiError> {
    found(state.catalog.states.get(&state_id))?;
    Ok(Json(state.catalog.cities.list_by_parent(&state_id)))
}

/// `POST /states/{state_id}/cities`
pub async fn create_city(
    State(state): State<AppState>,
    Path(state_id): Path<String>,
    body: Result<JsonBody<NewCity>, ApiError>,
) -> Result<(StatusCode, Json<City>), ApiError> {
    found(state.catalog.states.get(&state_id))?;
    let JsonBody(payload) = body?;

    let city = payload.build(&state_id, Utc::now())?;
    let city = state.catalog.cities.insert(city).await?;
    info!(city_id = %city.id, state_id = %state_id, "city created");
    Ok((StatusCode::CREATED, Json(city)))
}

pub async fn get_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<City>, ApiError> {
    Ok(Json(found(state.catalog.cities.get(&city_id))?))
}

pub async fn update_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
    body: Result<JsonBody<CityUpdate>, ApiError>,
) -> Result<Json<City>, ApiError> {
    found(state.catalog.cities.get(&city_id))?;
    let JsonBody(update) = body?;
    Ok(Json(found(state.catalog.cities.update(&city_id, &update).await?)?))
}

pub async fn delete_city(
    State(state): State<AppState>,
    Path(city_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    deleted(state.catalog.delete_city(&city_id).await?)
}
