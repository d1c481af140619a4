//! External persistence backend trait for the storage layer.
//!
//! [`MapDataStore`] is the outermost layer. The
//! [`RecordStore`](super::RecordStore) writes through to it on every
//! mutation and reads it once, at startup, to warm the in-memory engine.
//! Values cross this boundary as JSON documents so one backend serves every
//! entity kind.

use async_trait::async_trait;
use serde_json::Value;

/// Persistence backend shared by all record stores.
///
/// `map` is the entity kind (`"places"`, `"users"`, ...), `key` the record id.
/// Used as `Arc<dyn MapDataStore>`.
#[async_trait]
pub trait MapDataStore: Send + Sync {
    /// Persist a record, replacing any previous document for `key`.
    async fn add(&self, map: &str, key: &str, value: &Value) -> anyhow::Result<()>;

    /// Remove a record. Removing an absent key is not an error.
    async fn remove(&self, map: &str, key: &str) -> anyhow::Result<()>;

    /// Load every persisted record of `map`.
    async fn load_all(&self, map: &str) -> anyhow::Result<Vec<(String, Value)>>;

    /// Whether this is a null (no-op) implementation.
    fn is_null(&self) -> bool {
        false
    }
}
