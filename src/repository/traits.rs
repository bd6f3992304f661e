//! Repository Layer - Document Store Port
//!
//! Defines the abstract interface to the remote document store.
//! Implementations can use an in-memory map, JSON files on disk, etc.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

/// One stored document: an id assigned by the store plus a JSON field map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

/// Errors reported by store backends
///
/// Mapped to `DomainError` at the collection-store boundary: read failures
/// become `RemoteUnavailable`, write failures become `Persistence`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    WriteFailed(String),
    #[error("no document with id {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Async port to the remote document store
///
/// Collections are flat, unordered bags of documents addressed by name.
/// Delivery order of `fetch_all` is unspecified; callers sort.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in a collection, in arbitrary order.
    async fn fetch_all(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Insert a new document; the store assigns and returns the id.
    async fn insert(&self, collection: &str, fields: Value) -> StoreResult<String>;

    /// Overwrite a document's whole field map. Not a patch.
    async fn update(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()>;

    /// Remove a document.
    async fn remove(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Revision channel for a collection. The value is bumped after every
    /// successful write to that collection; receivers only ever need the
    /// latest revision, so a `watch` channel fits.
    async fn watch(&self, collection: &str) -> watch::Receiver<u64>;
}
