//! Record types for the storage layer.
//!
//! A [`Record`] pairs an entity with server-internal [`RecordMetadata`].
//! The metadata is never serialized to clients or to the data store.

/// Bookkeeping tracked for every stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMetadata {
    /// Monotonic insertion number within a store. Listings sort by it.
    pub sequence: u64,
    /// Starts at 1, incremented on every successful modification.
    pub version: u32,
}

impl RecordMetadata {
    #[must_use]
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            version: 1,
        }
    }

    /// Records a write.
    pub fn on_update(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

/// An entity plus its metadata. The unit of storage in
/// [`StorageEngine`](super::StorageEngine).
#[derive(Debug, Clone)]
pub struct Record<E> {
    pub value: E,
    pub metadata: RecordMetadata,
}
