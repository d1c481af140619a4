use async_trait::async_trait;

use crate::types::{City, Place, State};

/// Read-only data access needed by place search.
///
/// Each relation hop is an explicit query. "Not found" is `Ok(None)` or an
/// empty list; `Err` is reserved for backend failures.
#[async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Resolve a state by id.
    async fn get_state(&self, id: &str) -> anyhow::Result<Option<State>>;

    /// Cities owned by a state, in insertion order.
    async fn cities_of_state(&self, state_id: &str) -> anyhow::Result<Vec<City>>;

    /// Resolve a city by id.
    async fn get_city(&self, id: &str) -> anyhow::Result<Option<City>>;

    /// Places located in a city, in insertion order.
    async fn places_of_city(&self, city_id: &str) -> anyhow::Result<Vec<Place>>;

    /// Every place, in insertion order.
    async fn all_places(&self) -> anyhow::Result<Vec<Place>>;
}
