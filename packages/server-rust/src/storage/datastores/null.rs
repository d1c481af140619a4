//! No-op [`MapDataStore`] implementation.
//!
//! [`NullDataStore`] discards all writes and loads nothing. Records live only
//! as long as the process.

use async_trait::async_trait;
use serde_json::Value;

use crate::storage::map_data_store::MapDataStore;

/// Default backend when no data directory is configured.
pub struct NullDataStore;

#[async_trait]
impl MapDataStore for NullDataStore {
    async fn add(&self, _map: &str, _key: &str, _value: &Value) -> anyhow::Result<()> {
        Ok(())
    }

    async fn remove(&self, _map: &str, _key: &str) -> anyhow::Result<()> {
        Ok(())
    }

    async fn load_all(&self, _map: &str) -> anyhow::Result<Vec<(String, Value)>> {
        Ok(Vec::new())
    }

    fn is_null(&self) -> bool {
        true
    }
}
