//! Typed request payloads for creating and updating records.
//!
//! Create payloads deserialize every field as optional so a missing required
//! field surfaces as [`MissingField`] with the field name, rather than as an
//! opaque decode error. Update payloads are allow-lists: keys they do not
//! declare (ids, parent ids, timestamps) are ignored on deserialization and
//! can never be written.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{new_id, Amenity, City, Place, Review, State, User};

/// A required field was absent from a create payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Missing {0}")]
pub struct MissingField(pub &'static str);

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, MissingField> {
    value.ok_or(MissingField(field))
}

// ---------------------------------------------------------------------------
// Create payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    /// Builds a user. `email` is checked before `password`.
    ///
    /// # Errors
    ///
    /// Returns [`MissingField`] naming the first absent required field.
    pub fn build(self, now: DateTime<Utc>) -> Result<User, MissingField> {
        let email = require(self.email, "email")?;
        let password = require(self.password, "password")?;
        Ok(User {
            id: new_id(),
            created_at: now,
            updated_at: now,
            email,
            password,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewState {
    pub name: Option<String>,
}

impl NewState {
    /// # Errors
    ///
    /// Returns [`MissingField`] if `name` is absent.
    pub fn build(self, now: DateTime<Utc>) -> Result<State, MissingField> {
        Ok(State {
            id: new_id(),
            created_at: now,
            updated_at: now,
            name: require(self.name, "name")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCity {
    pub name: Option<String>,
}

impl NewCity {
    /// # Errors
    ///
    /// Returns [`MissingField`] if `name` is absent.
    pub fn build(self, state_id: &str, now: DateTime<Utc>) -> Result<City, MissingField> {
        Ok(City {
            id: new_id(),
            created_at: now,
            updated_at: now,
            state_id: state_id.to_string(),
            name: require(self.name, "name")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAmenity {
    pub name: Option<String>,
}

impl NewAmenity {
    /// # Errors
    ///
    /// Returns [`MissingField`] if `name` is absent.
    pub fn build(self, now: DateTime<Utc>) -> Result<Amenity, MissingField> {
        Ok(Amenity {
            id: new_id(),
            created_at: now,
            updated_at: now,
            name: require(self.name, "name")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlace {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl NewPlace {
    /// The owning user id. Handlers check it (and resolve the user) before
    /// the rest of the payload.
    ///
    /// # Errors
    ///
    /// Returns [`MissingField`] if `user_id` is absent.
    pub fn user_id(&self) -> Result<&str, MissingField> {
        self.user_id.as_deref().ok_or(MissingField("user_id"))
    }

    /// # Errors
    ///
    /// Returns [`MissingField`] for `user_id`, then `name`.
    pub fn build(self, city_id: &str, now: DateTime<Utc>) -> Result<Place, MissingField> {
        let user_id = require(self.user_id, "user_id")?;
        let name = require(self.name, "name")?;
        Ok(Place {
            id: new_id(),
            created_at: now,
            updated_at: now,
            city_id: city_id.to_string(),
            user_id,
            name,
            description: self.description,
            number_rooms: self.number_rooms.unwrap_or_default(),
            number_bathrooms: self.number_bathrooms.unwrap_or_default(),
            max_guest: self.max_guest.unwrap_or_default(),
            price_by_night: self.price_by_night.unwrap_or_default(),
            latitude: self.latitude,
            longitude: self.longitude,
            amenity_ids: Vec::new(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub user_id: Option<String>,
    pub text: Option<String>,
}

impl NewReview {
    /// # Errors
    ///
    /// Returns [`MissingField`] if `user_id` is absent.
    pub fn user_id(&self) -> Result<&str, MissingField> {
        self.user_id.as_deref().ok_or(MissingField("user_id"))
    }

    /// # Errors
    ///
    /// Returns [`MissingField`] for `user_id`, then `text`.
    pub fn build(self, place_id: &str, now: DateTime<Utc>) -> Result<Review, MissingField> {
        let user_id = require(self.user_id, "user_id")?;
        let text = require(self.text, "text")?;
        Ok(Review {
            id: new_id(),
            created_at: now,
            updated_at: now,
            place_id: place_id.to_string(),
            user_id,
            text,
        })
    }
}

// ---------------------------------------------------------------------------
// Update payloads (allow-lists)
// ---------------------------------------------------------------------------

/// Mutable user fields. `email` is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityUpdate {
    pub name: Option<String>,
}

/// Mutable place fields. Owner, city and amenity links are not updatable
/// here; links go through the dedicated link/unlink operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub text: Option<String>,
}
