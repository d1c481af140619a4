//! Layered record storage for the HBnB server.
//!
//! - **Layer 1** ([`StorageEngine`]): in-memory concurrent key-value map
//! - **Layer 2** ([`RecordStore`]): per-entity-kind orchestration with
//!   insertion order, versioning and write-through
//! - **Layer 3** ([`MapDataStore`]): external persistence backend
//!
//! [`RecordStoreFactory`] wires the layers together and [`Catalog`] holds one
//! store per entity kind.

pub mod catalog;
pub mod datastores;
pub mod engine;
pub mod engines;
pub mod factory;
pub mod impls;
pub mod map_data_store;
pub mod record;
pub mod record_store;

pub use catalog::{Catalog, CatalogStats};
pub use engine::StorageEngine;
pub use factory::{RecordStoreFactory, StorageConfig};
pub use map_data_store::MapDataStore;
pub use record::{Record, RecordMetadata};
pub use record_store::{Modified, RecordStore};
