//! Collection Admin - Operation Boundary
//!
//! One admin handle per collection surface. Every operation validates
//! before any I/O, reports its outcome through the notification sink
//! exactly once, and keeps the save tracker honest about in-flight writes.
//! Errors are returned to the caller too, but nothing goes unreported.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{CollectionEntity, DomainError, DomainResult};
use crate::notify::{NoticeKind, NotificationSink};
use crate::repository::{CollectionStore, ReorderOperations, SubscriptionHandle};
use super::tracker::SaveTracker;

/// Admin operations for one ordered collection
pub struct CollectionAdmin<E: CollectionEntity> {
    store: CollectionStore<E>,
    tracker: Mutex<SaveTracker>,
    notifier: Arc<dyn NotificationSink>,
}

impl<E: CollectionEntity> CollectionAdmin<E> {
    pub fn new(store: CollectionStore<E>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            store,
            tracker: Mutex::new(SaveTracker::new()),
            notifier,
        }
    }

    /// Resync the local list from the store. Also the recovery action the
    /// failure notices point the user at.
    pub async fn refresh(&self) -> DomainResult<Vec<E>> {
        match self.store.reload().await {
            Ok(items) => {
                self.notifier
                    .notify(&format!("{} list refreshed", E::LABEL), NoticeKind::Info);
                Ok(items)
            }
            Err(e) => {
                self.notifier.notify(
                    &format!("could not load the {} list: {}", E::LABEL, e),
                    NoticeKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Validate and persist a new entity at the end of the list.
    pub async fn create(&self, draft: E) -> DomainResult<E> {
        if let Err(e) = draft.validate() {
            self.notifier.notify(&e.to_string(), NoticeKind::Error);
            return Err(e);
        }
        match self.store.create(draft).await {
            Ok(created) => {
                self.notifier
                    .notify(&format!("{} created", E::LABEL), NoticeKind::Success);
                Ok(created)
            }
            Err(e) => {
                self.notifier.notify(
                    &format!("could not create {}: {}", E::LABEL, e),
                    NoticeKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Apply a local edit and mark the item dirty. Nothing is persisted
    /// and nothing is notified; `save_item` does both.
    pub async fn edit_item<F>(&self, id: &str, f: F) -> DomainResult<E>
    where
        F: FnOnce(&mut E),
    {
        let edited = self.store.edit(id, f).await?;
        self.tracker.lock().await.mark_dirty(id);
        Ok(edited)
    }

    /// Persist one item's local state. Returns `Ok(false)` when a save for
    /// this item is already in flight; the duplicate is coalesced instead
    /// of firing a second write.
    pub async fn save_item(&self, id: &str) -> DomainResult<bool> {
        let item = match self.store.get(id).await {
            Some(item) => item,
            None => {
                let e = DomainError::NotFound(format!("{} {}", E::LABEL, id));
                self.notifier.notify(
                    &format!("could not save {}: {}", E::LABEL, e),
                    NoticeKind::Error,
                );
                return Err(e);
            }
        };
        if let Err(e) = item.validate() {
            self.notifier.notify(&e.to_string(), NoticeKind::Error);
            return Err(e);
        }
        if !self.tracker.lock().await.begin_save(id) {
            log::debug!("{} {} already saving, coalesced", E::LABEL, id);
            return Ok(false);
        }

        let result = self.store.save(id).await;
        // Completion must reach the tracker on both paths, or the saving
        // flag would stick and block every later save of this item.
        self.tracker.lock().await.end_save(id, result.is_ok());

        match result {
            Ok(_) => {
                self.notifier
                    .notify(&format!("{} saved", E::LABEL), NoticeKind::Success);
                Ok(true)
            }
            Err(e) => {
                self.notifier.notify(
                    &format!("could not save {}: {}", E::LABEL, e),
                    NoticeKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Delete one item, then close the order gap it left. The two steps
    /// are reported distinctly: a failed delete keeps the item, while a
    /// failed renumbering after a successful delete only needs a refresh.
    pub async fn delete_item(&self, id: &str) -> DomainResult<()> {
        if let Err(e) = self.store.delete(id).await {
            self.notifier.notify(
                &format!("could not delete {}: {}", E::LABEL, e),
                NoticeKind::Error,
            );
            return Err(e);
        }
        self.tracker.lock().await.forget(id);

        match self.store.compact_orders().await {
            Ok(_) => {
                self.notifier
                    .notify(&format!("{} deleted", E::LABEL), NoticeKind::Success);
                Ok(())
            }
            Err(e) => {
                self.notifier.notify(
                    &format!(
                        "{} deleted, but renumbering failed; refresh to resync",
                        E::LABEL
                    ),
                    NoticeKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Move an item between list positions and persist the new order.
    /// Returns `Ok(false)` when source and destination are the same slot.
    pub async fn reorder(&self, source: usize, dest: usize) -> DomainResult<bool> {
        match self.store.reorder(source, dest).await {
            Ok(false) => Ok(false),
            Ok(true) => {
                self.notifier
                    .notify(&format!("{} order saved", E::LABEL), NoticeKind::Success);
                Ok(true)
            }
            Err(e @ DomainError::Validation(_)) => {
                self.notifier.notify(&e.to_string(), NoticeKind::Error);
                Err(e)
            }
            Err(e) => {
                // Writes may have partially landed; the local list keeps
                // the new order and the user is pointed at refresh.
                self.notifier.notify(
                    &format!(
                        "could not save the new {} order; refresh to resync",
                        E::LABEL
                    ),
                    NoticeKind::Error,
                );
                Err(e)
            }
        }
    }

    /// Live snapshots of this collection; see `CollectionStore::subscribe`.
    pub async fn subscribe<F>(&self, on_update: F) -> DomainResult<SubscriptionHandle>
    where
        F: Fn(Vec<E>) + Send + 'static,
    {
        self.store.subscribe(on_update).await
    }

    pub async fn items(&self) -> Vec<E> {
        self.store.items().await
    }

    pub async fn get(&self, id: &str) -> Option<E> {
        self.store.get(id).await
    }

    pub async fn is_dirty(&self, id: &str) -> bool {
        self.tracker.lock().await.is_dirty(id)
    }

    pub async fn is_saving(&self, id: &str) -> bool {
        self.tracker.lock().await.is_saving(id)
    }

    /// Ids with unsaved edits, for "discard changes?" prompts.
    pub async fn dirty_ids(&self) -> Vec<String> {
        self.tracker.lock().await.dirty_ids()
    }
}
