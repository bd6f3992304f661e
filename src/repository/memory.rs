//! Repository Layer - In-Memory Store
//!
//! Process-local `DocumentStore` for tests and demos. Reads and writes can be
//! made to fail on demand, and write calls are counted, so error paths and
//! no-write guarantees are testable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{watch, Mutex};

use super::traits::{Document, DocumentStore, StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Document>>,
    watchers: HashMap<String, watch::Sender<u64>>,
    next_id: u64,
    write_count: u64,
    fail_reads: bool,
    fail_writes: bool,
}

impl Inner {
    fn bump_revision(&mut self, collection: &str) {
        if let Some(tx) = self.watchers.get(collection) {
            tx.send_modify(|rev| *rev += 1);
        }
    }
}

/// In-memory document store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a collection. Does not count as writes and does not
    /// bump the revision channel.
    pub async fn seed(&self, collection: &str, docs: Vec<Document>) {
        let mut inner = self.inner.lock().await;
        inner.collections.insert(collection.to_string(), docs);
    }

    /// Make every subsequent read fail with `StoreError::Unavailable`.
    pub async fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().await.fail_reads = fail;
    }

    /// Make every subsequent write fail with `StoreError::WriteFailed`.
    pub async fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    /// Number of write calls received so far (insert/update/remove),
    /// rejected ones included.
    pub async fn write_count(&self) -> u64 {
        self.inner.lock().await.write_count
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(inner.collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Value) -> StoreResult<String> {
        let mut inner = self.inner.lock().await;
        inner.write_count += 1;
        if inner.fail_writes {
            return Err(StoreError::WriteFailed("injected write failure".to_string()));
        }
        inner.next_id += 1;
        let id = format!("doc-{}", inner.next_id);
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        inner.bump_revision(collection);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.write_count += 1;
        if inner.fail_writes {
            return Err(StoreError::WriteFailed("injected write failure".to_string()));
        }
        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        doc.fields = fields;
        inner.bump_revision(collection);
        Ok(())
    }

    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.write_count += 1;
        if inner.fail_writes {
            return Err(StoreError::WriteFailed("injected write failure".to_string()));
        }
        let docs = inner
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let position = docs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        docs.remove(position);
        inner.bump_revision(collection);
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
