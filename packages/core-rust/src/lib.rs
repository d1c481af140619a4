//! HBnB core: entity model, typed create/update payloads, and place search.

pub mod entity;
pub mod filter;
pub mod schema;
pub mod search;
pub mod traits;
pub mod types;

pub use entity::Entity;
pub use filter::PlaceFilter;
pub use schema::{
    AmenityUpdate, CityUpdate, MissingField, NewAmenity, NewCity, NewPlace, NewReview, NewState,
    NewUser, PlaceUpdate, ReviewUpdate, StateUpdate, UserUpdate,
};
pub use search::search_places;
pub use traits::PlaceDirectory;
pub use types::{new_id, Amenity, City, EntityId, Place, Review, State, User};
