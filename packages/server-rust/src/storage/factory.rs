//! Factory for creating fully-wired [`RecordStore`] instances.
//!
//! [`RecordStoreFactory`] is the dependency injection point that creates
//! [`DefaultRecordStore`] instances with both layers connected: a fresh
//! [`HashMapStorage`] engine and the shared [`MapDataStore`] chosen by
//! [`StorageConfig`].

use std::path::PathBuf;
use std::sync::Arc;

use hbnb_core::Entity;
use tracing::info;

use crate::storage::datastores::{FileDataStore, NullDataStore};
use crate::storage::engines::HashMapStorage;
use crate::storage::impls::DefaultRecordStore;
use crate::storage::map_data_store::MapDataStore;
use crate::storage::record_store::RecordStore;

/// Persistence settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory for JSON data files. `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
}

pub struct RecordStoreFactory {
    data_store: Arc<dyn MapDataStore>,
}

impl RecordStoreFactory {
    #[must_use]
    pub fn new(data_store: Arc<dyn MapDataStore>) -> Self {
        Self { data_store }
    }

    /// Factory whose stores never persist.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(NullDataStore))
    }

    /// Selects the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub async fn from_config(config: &StorageConfig) -> anyhow::Result<Self> {
        match &config.data_dir {
            Some(dir) => {
                let store = FileDataStore::open(dir.clone()).await?;
                info!(dir = %store.dir().display(), "using file data store");
                Ok(Self::new(Arc::new(store)))
            }
            None => {
                info!("no data directory configured, records are kept in memory");
                Ok(Self::in_memory())
            }
        }
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        !self.data_store.is_null()
    }

    /// Creates an empty store for entity kind `E`.
    #[must_use]
    pub fn create<E: Entity>(&self) -> Arc<dyn RecordStore<E>> {
        let engine = Box::new(HashMapStorage::<E>::new());
        Arc::new(DefaultRecordStore::new(engine, self.data_store.clone()))
    }
}
