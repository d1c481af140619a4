//! Reviews, nested under their place for listing and creation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hbnb_core::{NewReview, Review, ReviewUpdate};
use serde_json::Value;
use tracing::info;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

/// `GET /places/{place_id}/reviews`
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    found(state.catalog.places.get(&place_id))?;
    Ok(Json(state.catalog.reviews.list_by_parent(&place_id)))
}

/// `POST /places/{place_id}/reviews`
///
/// Checks, in order: the place exists, the body is JSON, `user_id` is
/// present, the user exists, `text` is present.
pub async fn create_review(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    body: Result<JsonBody<NewReview>, ApiError>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    found(state.catalog.places.get(&place_id))?;
    let JsonBody(payload) = body?;
    found(state.catalog.users.get(payload.user_id()?))?;

    let review = payload.build(&place_id, Utc::now())?;
    let review = state.catalog.reviews.insert(review).await?;
    info!(review_id = %review.id, place_id = %place_id, "review created");
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    Ok(Json(found(state.catalog.reviews.get(&review_id))?))
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: Result<JsonBody<ReviewUpdate>, ApiError>,
) -> Result<Json<Review>, ApiError> {
    found(state.catalog.reviews.get(&review_id))?;
    let JsonBody(update) = body?;
    Ok(Json(found(
        state.catalog.reviews.update(&review_id, &update).await?,
    )?))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    deleted(state.catalog.reviews.delete(&review_id).await?)
}
