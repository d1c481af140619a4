//! JSON-file [`MapDataStore`] implementation.
//!
//! Each map is one pretty-printed JSON object, `<dir>/<map>.json`, keyed by
//! record id. Every mutation rewrites the whole file through a temporary
//! sibling and a rename, so a crash leaves either the old or the new
//! document on disk, never a truncated one.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::storage::map_data_store::MapDataStore;

type Documents = BTreeMap<String, Value>;

pub struct FileDataStore {
    dir: PathBuf,
    /// Cached file contents per map, loaded on first touch.
    maps: Mutex<HashMap<String, Documents>>,
    /// One rewrite at a time, applied in arrival order. Callers that need
    /// mutation order must hold their own lock across the call.
    write_lock: tokio::sync::Mutex<()>,
}

impl FileDataStore {
    /// Opens (and creates, if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self {
            dir,
            maps: Mutex::new(HashMap::new()),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, map: &str) -> PathBuf {
        self.dir.join(format!("{map}.json"))
    }

    async fn read_file(&self, map: &str) -> anyhow::Result<Documents> {
        let path = self.path_for(map);
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("corrupt data file {}", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Documents::new()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    async fn ensure_loaded(&self, map: &str) -> anyhow::Result<()> {
        if self.maps.lock().contains_key(map) {
            return Ok(());
        }
        let documents = self.read_file(map).await?;
        self.maps
            .lock()
            .entry(map.to_string())
            .or_insert(documents);
        Ok(())
    }

    async fn rewrite(
        &self,
        map: &str,
        edit: impl FnOnce(&mut Documents) + Send,
    ) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        self.ensure_loaded(map).await?;

        let bytes = {
            let mut maps = self.maps.lock();
            let documents = maps.entry(map.to_string()).or_default();
            edit(documents);
            serde_json::to_vec_pretty(documents)?
        };

        let path = self.path_for(map);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("failed to replace {}", path.display()))?;

        debug!(map, bytes = bytes.len(), "data file rewritten");
        Ok(())
    }
}

#[async_trait]
impl MapDataStore for FileDataStore {
    async fn add(&self, map: &str, key: &str, value: &Value) -> anyhow::Result<()> {
        let value = value.clone();
        self.rewrite(map, move |documents| {
            documents.insert(key.to_string(), value);
        })
        .await
    }

    async fn remove(&self, map: &str, key: &str) -> anyhow::Result<()> {
        self.rewrite(map, |documents| {
            documents.remove(key);
        })
        .await
    }

    async fn load_all(&self, map: &str) -> anyhow::Result<Vec<(String, Value)>> {
        self.ensure_loaded(map).await?;
        let maps = self.maps.lock();
        Ok(maps
            .get(map)
            .map(|documents| {
                documents
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
