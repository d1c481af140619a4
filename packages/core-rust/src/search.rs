//! Place search over states, cities and amenities.
//!
//! Semantics:
//! 1. An empty filter lists every place.
//! 2. State and city ids are unioned: each resolvable state contributes the
//!    places of all its cities, each resolvable city its own places.
//!    Unknown ids contribute nothing.
//! 3. Requested amenities narrow the result to places linked to *all* of
//!    them. With no state or city ids the narrowing starts from every place,
//!    not from the (empty) union.
//!
//! Places are deduplicated by id and returned in discovery order.
//!
//! The search issues several independent directory reads and takes no
//! snapshot, so a concurrent writer may be observed halfway through.

use std::collections::HashSet;

use tracing::debug;

use crate::filter::PlaceFilter;
use crate::traits::PlaceDirectory;
use crate::types::{EntityId, Place};

/// Runs a place search against `directory`.
///
/// # Errors
///
/// Only propagates directory failures. Unknown ids are not errors.
pub async fn search_places(
    directory: &dyn PlaceDirectory,
    filter: &PlaceFilter,
) -> anyhow::Result<Vec<Place>> {
    if filter.is_empty() {
        return directory.all_places().await;
    }

    let mut places = if filter.has_geo() {
        union_by_location(directory, filter).await?
    } else {
        directory.all_places().await?
    };

    if !filter.amenities.is_empty() {
        places.retain(|place| place.has_all_amenities(&filter.amenities));
    }

    debug!(
        states = filter.states.len(),
        cities = filter.cities.len(),
        amenities = filter.amenities.len(),
        matched = places.len(),
        "place search complete"
    );

    Ok(places)
}

/// Union of the places under every resolvable state and city id.
async fn union_by_location(
    directory: &dyn PlaceDirectory,
    filter: &PlaceFilter,
) -> anyhow::Result<Vec<Place>> {
    let mut found = PlaceSet::default();

    for state_id in &filter.states {
        if directory.get_state(state_id).await?.is_none() {
            debug!(state_id = %state_id, "skipping unknown state");
            continue;
        }
        for city in directory.cities_of_state(state_id).await? {
            found.extend(directory.places_of_city(&city.id).await?);
        }
    }

    for city_id in &filter.cities {
        if directory.get_city(city_id).await?.is_none() {
            debug!(city_id = %city_id, "skipping unknown city");
            continue;
        }
        found.extend(directory.places_of_city(city_id).await?);
    }

    Ok(found.into_vec())
}

/// Insertion-ordered set of places keyed by id.
#[derive(Default)]
struct PlaceSet {
    seen: HashSet<EntityId>,
    places: Vec<Place>,
}

impl PlaceSet {
    fn extend(&mut self, places: impl IntoIterator<Item = Place>) {
        for place in places {
            if self.seen.insert(place.id.clone()) {
                self.places.push(place);
            }
        }
    }

    fn into_vec(self) -> Vec<Place> {
        self.places
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
