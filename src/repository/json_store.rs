//! Repository Layer - JSON File Store
//!
//! Durable local `DocumentStore`: one JSON file per collection under a root
//! directory, each an object keyed by document id. Writes rewrite the whole
//! file through a temp file and rename, so a crash never leaves a torn file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use super::traits::{Document, DocumentStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    watchers: HashMap<String, watch::Sender<u64>>,
}

/// File-backed document store
///
/// All operations take the store lock for their whole duration, so
/// read-modify-write cycles on the files never interleave.
#[derive(Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    inner: Arc<Mutex<Inner>>,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::Unavailable(format!("create store dir: {}", e)))?;
        Ok(Self {
            root,
            inner: Arc::new(Mutex::new(Inner::default())),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    async fn read_collection(&self, collection: &str) -> StoreResult<Map<String, Value>> {
        let path = self.collection_path(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Unavailable(format!("corrupt collection file {}: {}", path.display(), e))
        })
    }

    async fn write_collection(
        &self,
        collection: &str,
        docs: &Map<String, Value>,
    ) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let tmp = self.root.join(format!("{}.json.tmp", collection));
        let bytes = serde_json::to_vec_pretty(docs)
            .map_err(|e| StoreError::WriteFailed(format!("encode collection: {}", e)))?;
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("replace {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let _guard = self.inner.lock().await;
        let docs = self.read_collection(collection).await?;
        Ok(docs
            .into_iter()
            .map(|(id, fields)| Document { id, fields })
            .collect())
    }

    async fn insert(&self, collection: &str, fields: Value) -> StoreResult<String> {
        let mut inner = self.inner.lock().await;
        let mut docs = self.read_collection(collection).await?;
        let id = Uuid::new_v4().to_string();
        docs.insert(id.clone(), fields);
        self.write_collection(collection, &docs).await?;
        bump_revision(&mut inner, collection);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let mut docs = self.read_collection(collection).await?;
        if !docs.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        docs.insert(id.to_string(), fields);
        self.write_collection(collection, &docs).await?;
        bump_revision(&mut inner, collection);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let mut docs = self.read_collection(collection).await?;
        if docs.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write_collection(collection, &docs).await?;
        bump_revision(&mut inner, collection);
        Ok(())
    }

    async fn watch(&self, collection: &str) -> watch::Receiver<u64> {
        let mut inner = self.inner.lock().await;
        inner
            .watchers
            .entry(collection.to_string())
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }
}

fn bump_revision(inner: &mut Inner, collection: &str) {
    if let Some(tx) = inner.watchers.get(collection) {
        tx.send_modify(|rev| *rev += 1);
    }
}
