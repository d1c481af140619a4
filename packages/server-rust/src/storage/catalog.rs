//! The six typed record stores behind the API, plus the operations that
//! span more than one of them.
//!
//! Single-kind reads and writes go straight to the public store fields.
//! Anything that must keep references consistent across kinds (cascading
//! deletes and amenity links) goes through [`Catalog`] methods.

use std::sync::Arc;

use async_trait::async_trait;
use hbnb_core::{Amenity, City, Place, PlaceDirectory, Review, State, User};
use serde::Serialize;
use tracing::{debug, info};

use crate::storage::factory::{RecordStoreFactory, StorageConfig};
use crate::storage::record_store::RecordStore;

/// Record count per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub amenities: usize,
    pub cities: usize,
    pub places: usize,
    pub reviews: usize,
    pub states: usize,
    pub users: usize,
}

pub struct Catalog {
    pub users: Arc<dyn RecordStore<User>>,
    pub states: Arc<dyn RecordStore<State>>,
    pub cities: Arc<dyn RecordStore<City>>,
    pub amenities: Arc<dyn RecordStore<Amenity>>,
    pub places: Arc<dyn RecordStore<Place>>,
    pub reviews: Arc<dyn RecordStore<Review>>,
}

impl Catalog {
    #[must_use]
    pub fn new(factory: &RecordStoreFactory) -> Self {
        Self {
            users: factory.create(),
            states: factory.create(),
            cities: factory.create(),
            amenities: factory.create(),
            places: factory.create(),
            reviews: factory.create(),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(&RecordStoreFactory::in_memory())
    }

    /// Builds the catalog for `config` and loads any persisted records.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory is unusable or a data file
    /// cannot be parsed.
    pub async fn open(config: &StorageConfig) -> anyhow::Result<Self> {
        let factory = RecordStoreFactory::from_config(config).await?;
        let catalog = Self::new(&factory);
        if factory.is_persistent() {
            catalog.load().await?;
        }
        Ok(catalog)
    }

    async fn load(&self) -> anyhow::Result<()> {
        let loaded = self.users.load().await?
            + self.states.load().await?
            + self.cities.load().await?
            + self.amenities.load().await?
            + self.places.load().await?
            + self.reviews.load().await?;
        info!(records = loaded, "catalog loaded");
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            amenities: self.amenities.size(),
            cities: self.cities.size(),
            places: self.places.size(),
            reviews: self.reviews.size(),
            states: self.states.size(),
            users: self.users.size(),
        }
    }

    // -- cascading deletes -------------------------------------------------
    //
    // Children go first so an interrupted cascade never leaves a child whose
    // parent is already gone. Each returns `false` if `id` was unknown.

    /// Deletes a place and its reviews.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn delete_place(&self, id: &str) -> anyhow::Result<bool> {
        if self.places.get(id).is_none() {
            return Ok(false);
        }
        for review in self.reviews.list_by_parent(id) {
            self.reviews.delete(&review.id).await?;
        }
        self.places.delete(id).await
    }

    /// Deletes a city, its places and their reviews.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn delete_city(&self, id: &str) -> anyhow::Result<bool> {
        if self.cities.get(id).is_none() {
            return Ok(false);
        }
        for place in self.places.list_by_parent(id) {
            self.delete_place(&place.id).await?;
        }
        self.cities.delete(id).await
    }

    /// Deletes a state and everything located in it.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn delete_state(&self, id: &str) -> anyhow::Result<bool> {
        if self.states.get(id).is_none() {
            return Ok(false);
        }
        for city in self.cities.list_by_parent(id) {
            self.delete_city(&city.id).await?;
        }
        let deleted = self.states.delete(id).await?;
        debug!(state_id = id, "state deleted with its cities");
        Ok(deleted)
    }

    /// Deletes a user, the places they own and the reviews they wrote.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn delete_user(&self, id: &str) -> anyhow::Result<bool> {
        if self.users.get(id).is_none() {
            return Ok(false);
        }
        for place in self.places.list_all() {
            if place.user_id == id {
                self.delete_place(&place.id).await?;
            }
        }
        for review in self.reviews.list_all() {
            if review.user_id == id {
                self.reviews.delete(&review.id).await?;
            }
        }
        self.users.delete(id).await
    }

    /// Deletes an amenity and unlinks it from every place.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn delete_amenity(&self, id: &str) -> anyhow::Result<bool> {
        if self.amenities.get(id).is_none() {
            return Ok(false);
        }
        for place in self.places.list_all() {
            if place.has_amenity(id) {
                self.places
                    .modify(&place.id, &mut |p: &mut Place| p.unlink_amenity(id))
                    .await?;
            }
        }
        self.amenities.delete(id).await
    }

    // -- amenity links -----------------------------------------------------

    /// Amenities linked to a place, in link order. `None` if the place is
    /// unknown.
    #[must_use]
    pub fn place_amenities(&self, place_id: &str) -> Option<Vec<Amenity>> {
        let place = self.places.get(place_id)?;
        Some(
            place
                .amenity_ids
                .iter()
                .filter_map(|id| self.amenities.get(id))
                .collect(),
        )
    }

    /// Links an amenity to a place.
    ///
    /// Returns `None` if either record is unknown, otherwise whether a new
    /// link was created (`false` when it already existed).
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn link_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> anyhow::Result<Option<bool>> {
        if self.amenities.get(amenity_id).is_none() {
            return Ok(None);
        }
        let outcome = self
            .places
            .modify(place_id, &mut |p: &mut Place| p.link_amenity(amenity_id))
            .await?;
        Ok(outcome.map(|m| m.changed))
    }

    /// Removes a link. Returns `None` if either record is unknown, otherwise
    /// whether a link was removed.
    ///
    /// # Errors
    ///
    /// Propagates data store failures.
    pub async fn unlink_amenity(
        &self,
        place_id: &str,
        amenity_id: &str,
    ) -> anyhow::Result<Option<bool>> {
        if self.amenities.get(amenity_id).is_none() {
            return Ok(None);
        }
        let outcome = self
            .places
            .modify(place_id, &mut |p: &mut Place| p.unlink_amenity(amenity_id))
            .await?;
        Ok(outcome.map(|m| m.changed))
    }
}

#[async_trait]
impl PlaceDirectory for Catalog {
    async fn get_state(&self, id: &str) -> anyhow::Result<Option<State>> {
        Ok(self.states.get(id))
    }

    async fn cities_of_state(&self, state_id: &str) -> anyhow::Result<Vec<City>> {
        Ok(self.cities.list_by_parent(state_id))
    }

    async fn get_city(&self, id: &str) -> anyhow::Result<Option<City>> {
        Ok(self.cities.get(id))
    }

    async fn places_of_city(&self, city_id: &str) -> anyhow::Result<Vec<Place>> {
        Ok(self.places.list_by_parent(city_id))
    }

    async fn all_places(&self) -> anyhow::Result<Vec<Place>> {
        Ok(self.places.list_all())
    }
}
