//! Per-entity-kind record store trait.
//!
//! Defines [`RecordStore`], the interface handlers and the
//! [`Catalog`](super::Catalog) interact with. Implementations coordinate the
//! in-memory [`StorageEngine`](super::StorageEngine) with the
//! [`MapDataStore`](super::MapDataStore) backend.

use async_trait::async_trait;
use hbnb_core::Entity;

/// Outcome of [`RecordStore::modify`].
#[derive(Debug, Clone)]
pub struct Modified<E> {
    /// The record after the mutation ran.
    pub value: E,
    /// Whether the mutation reported a change. Unchanged records are neither
    /// touched nor written through.
    pub changed: bool,
}

/// Storage for one entity kind.
///
/// Reads are served from memory and never fail; writes go through to the
/// backing data store and surface its errors. Listings are in insertion
/// order.
///
/// Used as `Arc<dyn RecordStore<E>>`.
#[async_trait]
pub trait RecordStore<E: Entity>: Send + Sync {
    fn get(&self, id: &str) -> Option<E>;

    fn list_all(&self) -> Vec<E>;

    /// Records whose [`Entity::parent_id`] equals `parent_id`.
    fn list_by_parent(&self, parent_id: &str) -> Vec<E>;

    fn size(&self) -> usize;

    /// Store a new record and write it through.
    async fn insert(&self, entity: E) -> anyhow::Result<E>;

    /// Apply a typed partial update and refresh `updated_at`.
    /// Returns `None` if `id` is unknown.
    async fn update(&self, id: &str, update: &E::Update) -> anyhow::Result<Option<E>>;

    /// Run `mutate` against the stored record under its entry lock. When it
    /// returns `true` the record is touched, versioned and written through
    /// before any later write to this store begins.
    /// Returns `None` if `id` is unknown.
    async fn modify(
        &self,
        id: &str,
        mutate: &mut (dyn for<'a> FnMut(&'a mut E) -> bool + Send),
    ) -> anyhow::Result<Option<Modified<E>>>;

    /// Remove a record. Returns `false` if `id` is unknown.
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;

    /// Populate memory from the data store. Returns the number of records
    /// loaded.
    async fn load(&self) -> anyhow::Result<usize>;
}
