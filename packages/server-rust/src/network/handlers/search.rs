use axum::extract::State;
use axum::Json;
use hbnb_core::{search_places, Place, PlaceFilter};

use super::AppState;
use crate::network::{ApiError, JsonBody};

/// `POST /api/v1/places_search`
pub async fn places_search(
    State(state): State<AppState>,
    JsonBody(filter): JsonBody<PlaceFilter>,
) -> Result<Json<Vec<Place>>, ApiError> {
    Ok(Json(search_places(&*state.catalog, &filter).await?))
}
