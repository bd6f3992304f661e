//! Collection Store - Core Operations
//!
//! In-memory ordered view of one remote collection, generic over any
//! `CollectionEntity`. Hydrates and normalizes documents on load, keeps the
//! list sorted by `(order, id)`, and writes through to the document store.
//! Reordering lives in a separate module (`reorder`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{now_ms, CollectionEntity, DomainError, DomainResult};
use super::traits::{DocumentStore, StoreError};

/// Ordered local view of one remote collection
///
/// The item lock is held for the whole duration of every structural
/// operation (load, create, delete, reorder), so they never interleave on
/// one collection. Single-item saves only hold it long enough to snapshot
/// the fields, so saves of distinct items may overlap.
pub struct CollectionStore<E: CollectionEntity> {
    pub(super) store: Arc<dyn DocumentStore>,
    pub(super) items: Arc<Mutex<Vec<E>>>,
}

impl<E: CollectionEntity> Clone for CollectionStore<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            items: self.items.clone(),
        }
    }
}

impl<E: CollectionEntity> CollectionStore<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            items: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Hydrate from the remote store and replace the local list.
    ///
    /// Every document is normalized (bilingual fields folded into canonical
    /// shape, malformed scalars defaulted) and the result is sorted by
    /// `(order, id)`; remote delivery order is never trusted. On failure
    /// the local list is left untouched.
    pub async fn load(&self) -> DomainResult<Vec<E>> {
        let mut items = self.items.lock().await;
        let docs = self
            .store
            .fetch_all(E::COLLECTION)
            .await
            .map_err(read_err)?;
        let mut loaded: Vec<E> = docs
            .iter()
            .map(|doc| E::from_document(&doc.id, &doc.fields))
            .collect();
        sort_by_order(&mut loaded);
        log::debug!("loaded {} documents from {}", loaded.len(), E::COLLECTION);
        *items = loaded.clone();
        Ok(loaded)
    }

    /// Explicit resync. The recovery path after a reported write failure
    /// left local and remote state possibly diverged.
    pub async fn reload(&self) -> DomainResult<Vec<E>> {
        self.load().await
    }

    /// Snapshot of the current local list.
    pub async fn items(&self) -> Vec<E> {
        self.items.lock().await.clone()
    }

    /// One item by id, if present locally.
    pub async fn get(&self, id: &str) -> Option<E> {
        self.items.lock().await.iter().find(|i| i.id() == id).cloned()
    }

    /// Apply a local edit to one item and bump its modification time.
    /// Nothing is persisted; call `save` for that.
    pub async fn edit<F>(&self, id: &str, f: F) -> DomainResult<E>
    where
        F: FnOnce(&mut E),
    {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        f(item);
        item.stamp_updated(now_ms());
        Ok(item.clone())
    }

    /// Persist a new entity at the end of the list.
    ///
    /// The draft gets `order = len` and fresh timestamps, the store assigns
    /// the id, and the item is appended locally only after the insert
    /// succeeded.
    pub async fn create(&self, mut draft: E) -> DomainResult<E> {
        let mut items = self.items.lock().await;
        draft.set_order(items.len() as u32);
        let now = now_ms();
        draft.stamp_created(now);
        draft.stamp_updated(now);
        let id = self
            .store
            .insert(E::COLLECTION, draft.to_fields())
            .await
            .map_err(write_err)?;
        draft.set_id(id);
        items.push(draft.clone());
        log::debug!("created {} {}", E::LABEL, draft.id());
        Ok(draft)
    }

    /// Write one item's full current field set to the store (overwrite, not
    /// a patch). Local state is untouched either way, so a failed save can
    /// simply be retried.
    pub async fn save(&self, id: &str) -> DomainResult<E> {
        let (fields, snapshot) = {
            let items = self.items.lock().await;
            let item = items
                .iter()
                .find(|i| i.id() == id)
                .ok_or_else(|| not_found::<E>(id))?;
            (item.to_fields(), item.clone())
        };
        self.store
            .update(E::COLLECTION, id, fields)
            .await
            .map_err(write_err)?;
        Ok(snapshot)
    }

    /// Remove one item remotely, then locally. The remote remove comes
    /// first: if it fails, the local list keeps the item. Order gaps are
    /// left to `compact_orders` so the caller can tell deletion failures
    /// from renumbering failures.
    pub async fn delete(&self, id: &str) -> DomainResult<()> {
        let mut items = self.items.lock().await;
        let position = items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| not_found::<E>(id))?;
        self.store
            .remove(E::COLLECTION, id)
            .await
            .map_err(write_err)?;
        items.remove(position);
        log::debug!("deleted {} {}", E::LABEL, id);
        Ok(())
    }

    /// Deliver the current snapshot once, then again on every remote change,
    /// until the returned handle unsubscribes.
    ///
    /// The revision channel is taken before the initial load: a change
    /// landing between the two shows up as an extra delivery, never a
    /// missed one.
    pub async fn subscribe<F>(&self, on_update: F) -> DomainResult<SubscriptionHandle>
    where
        F: Fn(Vec<E>) + Send + 'static,
    {
        let mut rx = self.store.watch(E::COLLECTION).await;
        let snapshot = self.load().await?;
        on_update(snapshot);

        let cancelled = Arc::new(AtomicBool::new(false));
        let delivering = Arc::new(std::sync::Mutex::new(()));
        let this = self.clone();
        let flag = cancelled.clone();
        let delivery_slot = delivering.clone();
        let task = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                match this.load().await {
                    Ok(snapshot) => {
                        let _delivery = delivery_slot
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner());
                        if flag.load(Ordering::SeqCst) {
                            break;
                        }
                        on_update(snapshot);
                    }
                    Err(e) => {
                        log::warn!("{} subscription refresh failed: {}", E::COLLECTION, e);
                    }
                }
            }
        });
        Ok(SubscriptionHandle {
            cancelled,
            delivering,
            task,
        })
    }
}

/// Active subscription to one collection. Dropping it also unsubscribes.
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
    delivering: Arc<std::sync::Mutex<()>>,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Stop delivery. Once this returns, no further update callback runs,
    /// including for remote events already in flight.
    pub fn unsubscribe(self) {
        self.cancel();
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Wait out a delivery already in progress; later ones see the flag.
        drop(
            self.delivering
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        self.task.abort();
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Stable display order: by rank, ties broken by id.
pub(super) fn sort_by_order<E: CollectionEntity>(items: &mut [E]) {
    items.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.id().cmp(b.id())));
}

pub(super) fn not_found<E: CollectionEntity>(id: &str) -> DomainError {
    DomainError::NotFound(format!("{} {}", E::LABEL, id))
}

/// Read-side store failure: the remote is unreachable.
pub(super) fn read_err(e: StoreError) -> DomainError {
    match e {
        StoreError::NotFound(id) => DomainError::NotFound(id),
        other => DomainError::RemoteUnavailable(other.to_string()),
    }
}

/// Write-side store failure: changes did not land.
pub(super) fn write_err(e: StoreError) -> DomainError {
    match e {
        StoreError::NotFound(id) => DomainError::NotFound(id),
        other => DomainError::Persistence(other.to_string()),
    }
}
