//! In-memory [`StorageEngine`] implementation backed by [`DashMap`].
//!
//! Readers never block each other; writers contend only on the shard that
//! holds their key.

use dashmap::DashMap;

use crate::storage::engine::StorageEngine;
use crate::storage::record::Record;

pub struct HashMapStorage<E> {
    entries: DashMap<String, Record<E>>,
}

impl<E> HashMapStorage<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<E> Default for HashMapStorage<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> StorageEngine<E> for HashMapStorage<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn put(&self, key: &str, record: Record<E>) -> Option<Record<E>> {
        self.entries.insert(key.to_string(), record)
    }

    fn get(&self, key: &str) -> Option<Record<E>> {
        self.entries.get(key).map(|r| r.clone())
    }

    fn remove(&self, key: &str) -> Option<Record<E>> {
        self.entries.remove(key).map(|(_, r)| r)
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn modify(&self, key: &str, mutate: &mut dyn FnMut(&mut Record<E>)) -> Option<Record<E>> {
        let mut entry = self.entries.get_mut(key)?;
        mutate(entry.value_mut());
        Some(entry.value().clone())
    }

    fn snapshot_iter(&self) -> Vec<(String, Record<E>)> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}
