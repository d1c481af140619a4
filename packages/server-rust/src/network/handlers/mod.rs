//! HTTP handler definitions for the HBnB API.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for building the router.

pub mod amenities;
pub mod cities;
pub mod health;
pub mod index;
pub mod place_amenities;
pub mod places;
pub mod reviews;
pub mod search;
pub mod states;
pub mod users;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use index::{stats_handler, status_handler};
pub use search::places_search;

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use serde_json::{json, Value};

use super::{ApiError, Lifecycle, NetworkConfig};
use crate::storage::Catalog;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    /// Health state and in-flight tracking.
    pub lifecycle: Arc<Lifecycle>,
    pub config: Arc<NetworkConfig>,
    /// Used for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, lifecycle: Arc<Lifecycle>, config: NetworkConfig) -> Self {
        Self {
            catalog,
            lifecycle,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}

/// Turns a lookup miss into a 404.
pub(crate) fn found<T>(value: Option<T>) -> Result<T, ApiError> {
    value.ok_or(ApiError::NotFound)
}

/// Body of a successful delete.
pub(crate) fn deleted(existed: bool) -> Result<Json<Value>, ApiError> {
    if existed {
        Ok(Json(json!({})))
    } else {
        Err(ApiError::NotFound)
    }
}
