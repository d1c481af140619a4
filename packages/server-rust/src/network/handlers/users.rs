//! `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use hbnb_core::{NewUser, User, UserUpdate};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::{deleted, found, AppState};
use crate::network::{ApiError, JsonBody};

/// A user as returned by the API. The password never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserResponse>> {
    Json(
        state
            .catalog
            .users
            .list_all()
            .into_iter()
            .map(UserResponse::from)
            .collect(),
    )
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = found(state.catalog.users.get(&user_id))?;
    Ok(Json(user.into()))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = payload.build(Utc::now())?;
    let user = state.catalog.users.insert(user).await?;
    info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    body: Result<JsonBody<UserUpdate>, ApiError>,
) -> Result<Json<UserResponse>, ApiError> {
    found(state.catalog.users.get(&user_id))?;
    let JsonBody(update) = body?;
    let user = found(state.catalog.users.update(&user_id, &update).await?)?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let existed = state.catalog.delete_user(&user_id).await?;
    if existed {
        info!(user_id = %user_id, "user deleted");
    }
    deleted(existed)
}
