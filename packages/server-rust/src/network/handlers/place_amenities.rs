//! Links between a place and its amenities.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hbnb_core::Amenity;
use serde_json::{json, Value};
use tracing::debug;

use super::{found, AppState};
use crate::network::ApiError;

/// `GET /places/{place_id}/amenities`
pub async fn list_place_amenities(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Amenity>>, ApiError> {
    Ok(Json(found(state.catalog.place_amenities(&place_id))?))
}

/// `POST /places/{place_id}/amenities/{amenity_id}`
///
/// 201 with the amenity when a link is created, 200 when it already existed.
pub async fn link_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Amenity>), ApiError> {
    let created = found(state.catalog.link_amenity(&place_id, &amenity_id).await?)?;
    let amenity = found(state.catalog.amenities.get(&amenity_id))?;

    debug!(place_id = %place_id, amenity_id = %amenity_id, created, "amenity linked");
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(amenity)))
}

/// `DELETE /places/{place_id}/amenities/{amenity_id}`
///
/// 404 if either record is unknown or they were not linked.
pub async fn unlink_amenity(
    State(state): State<AppState>,
    Path((place_id, amenity_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let removed = found(state.catalog.unlink_amenity(&place_id, &amenity_id).await?)?;
    if !removed {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({})))
}
