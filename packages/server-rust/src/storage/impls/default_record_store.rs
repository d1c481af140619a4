//! Record store that layers the in-memory engine over a data store.
//!
//! [`DefaultRecordStore`] keeps every record of one entity kind in its
//! [`StorageEngine`](crate::storage::StorageEngine), stamps insertion
//! sequence and version metadata, and writes each mutation through to the
//! [`MapDataStore`](crate::storage::MapDataStore).
//!
//! Writers hold the store's write lock from the in-memory mutation until the
//! data store has accepted the result, so the backend sees mutations in the
//! order memory applied them. Reads never take the lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use hbnb_core::Entity;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::storage::engine::StorageEngine;
use crate::storage::map_data_store::MapDataStore;
use crate::storage::record::{Record, RecordMetadata};
use crate::storage::record_store::{Modified, RecordStore};

/// Orders records by insertion sequence and strips metadata.
fn in_insertion_order<E>(mut records: Vec<Record<E>>) -> Vec<E> {
    records.sort_by_key(|r| r.metadata.sequence);
    records.into_iter().map(|r| r.value).collect()
}

pub struct DefaultRecordStore<E> {
    engine: Box<dyn StorageEngine<E>>,
    data_store: Arc<dyn MapDataStore>,
    next_sequence: AtomicU64,
    write_lock: Mutex<()>,
}

impl<E: Entity> DefaultRecordStore<E> {
    #[must_use]
    pub fn new(engine: Box<dyn StorageEngine<E>>, data_store: Arc<dyn MapDataStore>) -> Self {
        Self {
            engine,
            data_store,
            next_sequence: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    fn next_metadata(&self) -> RecordMetadata {
        RecordMetadata::new(self.next_sequence.fetch_add(1, Ordering::Relaxed))
    }

    async fn write_through(&self, entity: &E) -> anyhow::Result<()> {
        if self.data_store.is_null() {
            return Ok(());
        }
        let document = serde_json::to_value(entity)
            .with_context(|| format!("failed to encode {} record {}", E::KIND, entity.id()))?;
        self.data_store.add(E::KIND, entity.id(), &document).await
    }
}

#[async_trait]
impl<E: Entity> RecordStore<E> for DefaultRecordStore<E> {
    fn get(&self, id: &str) -> Option<E> {
        self.engine.get(id).map(|r| r.value)
    }

    fn list_all(&self) -> Vec<E> {
        in_insertion_order(
            self.engine
                .snapshot_iter()
                .into_iter()
                .map(|(_, r)| r)
                .collect(),
        )
    }

    fn list_by_parent(&self, parent_id: &str) -> Vec<E> {
        in_insertion_order(
            self.engine
                .snapshot_iter()
                .into_iter()
                .map(|(_, r)| r)
                .filter(|r| r.value.parent_id() == Some(parent_id))
                .collect(),
        )
    }

    fn size(&self) -> usize {
        self.engine.size()
    }

    async fn insert(&self, entity: E) -> anyhow::Result<E> {
        let record = Record {
            value: entity.clone(),
            metadata: self.next_metadata(),
        };
        let _guard = self.write_lock.lock().await;
        self.engine.put(entity.id(), record);
        self.write_through(&entity).await?;

        debug!(kind = E::KIND, id = entity.id(), "record inserted");
        Ok(entity)
    }

    async fn update(&self, id: &str, update: &E::Update) -> anyhow::Result<Option<E>> {
        let modified = self
            .modify(id, &mut |entity: &mut E| {
                entity.apply(update);
                true
            })
            .await?;
        Ok(modified.map(|m| m.value))
    }

    async fn modify(
        &self,
        id: &str,
        mutate: &mut (dyn for<'a> FnMut(&'a mut E) -> bool + Send),
    ) -> anyhow::Result<Option<Modified<E>>> {
        let _guard = self.write_lock.lock().await;
        let now = Utc::now();
        let mut changed = false;
        let record = self.engine.modify(id, &mut |record: &mut Record<E>| {
            changed = mutate(&mut record.value);
            if changed {
                record.value.touch(now);
                record.metadata.on_update();
            }
        });

        let Some(record) = record else {
            return Ok(None);
        };
        if changed {
            self.write_through(&record.value).await?;
            debug!(
                kind = E::KIND,
                id,
                version = record.metadata.version,
                "record updated"
            );
        }

        Ok(Some(Modified {
            value: record.value,
            changed,
        }))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let _guard = self.write_lock.lock().await;
        if self.engine.remove(id).is_none() {
            return Ok(false);
        }
        if !self.data_store.is_null() {
            self.data_store.remove(E::KIND, id).await?;
        }

        debug!(kind = E::KIND, id, "record deleted");
        Ok(true)
    }

    async fn load(&self) -> anyhow::Result<usize> {
        let mut entities = self
            .data_store
            .load_all(E::KIND)
            .await?
            .into_iter()
            .map(|(key, document)| {
                serde_json::from_value::<E>(document)
                    .with_context(|| format!("invalid {} record {key}", E::KIND))
            })
            .collect::<anyhow::Result<Vec<E>>>()?;

        // Rebuild insertion order from creation time; ids break ties.
        entities.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });

        let count = entities.len();
        for entity in entities {
            let id = entity.id().to_string();
            let record = Record {
                value: entity,
                metadata: self.next_metadata(),
            };
            self.engine.put(&id, record);
        }

        if count > 0 {
            info!(kind = E::KIND, count, "records loaded");
        }
        Ok(count)
    }
}
