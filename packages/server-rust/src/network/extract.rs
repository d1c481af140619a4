//! JSON body extractor that rejects with [`ApiError`].

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Like [`axum::Json`], but a missing, malformed or oversized body becomes
/// an [`ApiError`] rendered in the API's error shape.
///
/// Every payload the API accepts is a JSON object. Arrays, scalars and
/// `null` are rejected as [`ApiError::NotJson`] before `T` sees them, so a
/// derived struct never reads a positional array as its fields.
///
/// Handlers that must report 404 for an unknown path id before looking at
/// the body take `Result<JsonBody<T>, ApiError>` and apply `?` after the
/// lookup.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        if !value.is_object() {
            return Err(ApiError::NotJson);
        }
        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}
