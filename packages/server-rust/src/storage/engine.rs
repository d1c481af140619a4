//! Low-level storage engine trait.
//!
//! [`StorageEngine`] is the innermost layer: a synchronous, concurrent
//! key-value map of [`Record`]s. It knows nothing about entities beyond
//! cloning them.

use super::record::Record;

/// Typed in-memory key-value storage.
///
/// Wrapped in `Box<dyn StorageEngine<E>>` by the record store.
pub trait StorageEngine<E>: Send + Sync + 'static {
    /// Insert or replace a record. Returns the previous record if any.
    fn put(&self, key: &str, record: Record<E>) -> Option<Record<E>>;

    fn get(&self, key: &str) -> Option<Record<E>>;

    fn remove(&self, key: &str) -> Option<Record<E>>;

    /// Number of records held.
    fn size(&self) -> usize;

    /// Mutate a record in place while holding its entry lock, so concurrent
    /// modifications of the same key are serialized. Returns a copy of the
    /// record after `mutate` ran, or `None` if the key is absent.
    ///
    /// `mutate` must not call back into this engine.
    fn modify(&self, key: &str, mutate: &mut dyn FnMut(&mut Record<E>)) -> Option<Record<E>>;

    /// Point-in-time copy of all entries, in no particular order.
    fn snapshot_iter(&self) -> Vec<(String, Record<E>)>;
}
