//! Request body of the place search endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::EntityId;

/// The three id sets accepted by place search.
///
/// Every key is optional; an absent key or an explicit `null` means empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceFilter {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<EntityId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cities: Vec<EntityId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<EntityId>,
}

impl PlaceFilter {
    /// `true` when no id set carries anything: the request lists all places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_geo() && self.amenities.is_empty()
    }

    /// `true` when at least one state or city id was requested.
    #[must_use]
    pub fn has_geo(&self) -> bool {
        !self.states.is_empty() || !self.cities.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<EntityId>>::deserialize(deserializer)?.unwrap_or_default())
}
