//! Uniform view over the six entity kinds, used by generic storage code.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::{
    AmenityUpdate, CityUpdate, PlaceUpdate, ReviewUpdate, StateUpdate, UserUpdate,
};
use crate::types::{Amenity, City, Place, Review, State, User};

/// A storable record with identity, an optional parent, and a typed
/// allow-list of mutable fields.
///
/// Storage is generic over this trait, so a record store for any kind is
/// created from the same code path.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, used as the persistence map name and in log fields.
    const KIND: &'static str;

    /// Partial update payload. Only the fields it declares can change.
    type Update: Send + Sync;

    fn id(&self) -> &str;

    /// Id of the owning record (`City -> State`, `Place -> City`,
    /// `Review -> Place`). `None` for root kinds.
    fn parent_id(&self) -> Option<&str>;

    fn created_at(&self) -> DateTime<Utc>;

    /// Sets `updated_at`.
    fn touch(&mut self, now: DateTime<Utc>);

    /// Copies every field present in `update` onto `self`.
    fn apply(&mut self, update: &Self::Update);
}

/// Replaces `target` with a clone of `value` when the update carries one.
fn set<T: Clone>(target: &mut T, value: Option<&T>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

impl Entity for User {
    const KIND: &'static str = "users";
    type Update = UserUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &UserUpdate) {
        set(&mut self.password, update.password.as_ref());
        if update.first_name.is_some() {
            self.first_name.clone_from(&update.first_name);
        }
        if update.last_name.is_some() {
            self.last_name.clone_from(&update.last_name);
        }
    }
}

impl Entity for State {
    const KIND: &'static str = "states";
    type Update = StateUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &StateUpdate) {
        set(&mut self.name, update.name.as_ref());
    }
}

impl Entity for City {
    const KIND: &'static str = "cities";
    type Update = CityUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.state_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &CityUpdate) {
        set(&mut self.name, update.name.as_ref());
    }
}

impl Entity for Amenity {
    const KIND: &'static str = "amenities";
    type Update = AmenityUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &AmenityUpdate) {
        set(&mut self.name, update.name.as_ref());
    }
}

impl Entity for Place {
    const KIND: &'static str = "places";
    type Update = PlaceUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.city_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &PlaceUpdate) {
        set(&mut self.name, update.name.as_ref());
        if update.description.is_some() {
            self.description.clone_from(&update.description);
        }
        set(&mut self.number_rooms, update.number_rooms.as_ref());
        set(&mut self.number_bathrooms, update.number_bathrooms.as_ref());
        set(&mut self.max_guest, update.max_guest.as_ref());
        set(&mut self.price_by_night, update.price_by_night.as_ref());
        if update.latitude.is_some() {
            self.latitude = update.latitude;
        }
        if update.longitude.is_some() {
            self.longitude = update.longitude;
        }
    }
}

impl Entity for Review {
    const KIND: &'static str = "reviews";
    type Update = ReviewUpdate;

    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.place_id)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn apply(&mut self, update: &ReviewUpdate) {
        set(&mut self.text, update.text.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NewCity, NewPlace, NewUser};

    #[test]
    fn parent_ids_follow_ownership() {
        let now = Utc::now();
        let city = NewCity {
            name: Some("Austin".to_string()),
        }
        .build("s1", now)
        .unwrap();
        assert_eq!(city.parent_id(), Some("s1"));

        let place = NewPlace {
            user_id: Some("u1".to_string()),
            name: Some("Loft".to_string()),
            ..NewPlace::default()
        }
        .build("c1", now)
        .unwrap();
        assert_eq!(place.parent_id(), Some("c1"));

        let user = NewUser {
            email: Some("a@b.c".to_string()),
            password: Some("pw".to_string()),
            ..NewUser::default()
        }
        .build(now)
        .unwrap();
        assert_eq!(user.parent_id(), None);
    }

    #[test]
    fn place_apply_leaves_absent_fields_untouched() {
        let now = Utc::now();
        let mut place = NewPlace {
            user_id: Some("u1".to_string()),
            name: Some("Loft".to_string()),
            number_rooms: Some(3),
            description: Some("Sunny".to_string()),
            ..NewPlace::default()
        }
        .build("c1", now)
        .unwrap();

        place.apply(&PlaceUpdate {
            price_by_night: Some(120),
            ..PlaceUpdate::default()
        });

        assert_eq!(place.price_by_night, 120);
        assert_eq!(place.number_rooms, 3);
        assert_eq!(place.description.as_deref(), Some("Sunny"));
        assert_eq!(place.name, "Loft");
    }

    #[test]
    fn user_apply_never_changes_email() {
        let now = Utc::now();
        let mut user = NewUser {
            email: Some("a@b.c".to_string()),
            password: Some("old".to_string()),
            ..NewUser::default()
        }
        .build(now)
        .unwrap();

        let update: UserUpdate = serde_json::from_value(serde_json::json!({
            "email": "evil@b.c",
            "password": "new",
            "first_name": "Ada",
        }))
        .unwrap();
        user.apply(&update);

        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.password, "new");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
    }
}
