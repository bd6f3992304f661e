//! Collection Reordering Operations
//!
//! Drag-and-drop reordering and dense renumbering for collection stores.
//! The local list is spliced first, synchronously under the item lock, then
//! only the members whose rank actually changed are written out, one
//! concurrent update per member.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;

use super::collection::CollectionStore;
use super::traits::DocumentStore;
use crate::domain::{now_ms, CollectionEntity, DomainError, DomainResult};

/// Reordering operations for ordered collections
#[async_trait]
pub trait ReorderOperations {
    /// Move the item at `source` so it ends up at `dest` (splice semantics:
    /// remove, then reinsert into the shortened list), renumber densely,
    /// and persist every changed rank. Returns whether anything moved.
    async fn reorder(&self, source: usize, dest: usize) -> DomainResult<bool>;

    /// Restore the dense zero-based ranking after a gap opened (typically a
    /// delete) and persist every changed rank. Returns how many changed.
    async fn compact_orders(&self) -> DomainResult<usize>;
}

#[async_trait]
impl<E: CollectionEntity> ReorderOperations for CollectionStore<E> {
    async fn reorder(&self, source: usize, dest: usize) -> DomainResult<bool> {
        let mut items = self.items.lock().await;
        let len = items.len();
        if source >= len || dest >= len {
            return Err(DomainError::Validation(format!(
                "cannot move item {} to {} in a list of {}",
                source, dest, len
            )));
        }
        if source == dest {
            return Ok(false);
        }

        let moved = items.remove(source);
        items.insert(dest, moved);
        let changed = renumber(&mut items);
        log::debug!(
            "{}: moved {} -> {}, {} ranks rewritten",
            E::COLLECTION,
            source,
            dest,
            changed.len()
        );
        // The lock stays held across the writes: the reorder finishes
        // (or fails) before the next structural operation starts.
        persist_ranks(&*self.store, E::COLLECTION, &changed).await?;
        Ok(true)
    }

    async fn compact_orders(&self) -> DomainResult<usize> {
        let mut items = self.items.lock().await;
        let changed = renumber(&mut items);
        if changed.is_empty() {
            return Ok(0);
        }
        log::debug!("{}: compacted {} ranks", E::COLLECTION, changed.len());
        persist_ranks(&*self.store, E::COLLECTION, &changed).await?;
        Ok(changed.len())
    }
}

/// Assign `order = position` over the current sequence. Returns the full
/// field sets of the members whose rank changed; untouched members are not
/// rewritten.
fn renumber<E: CollectionEntity>(items: &mut [E]) -> Vec<(String, Value)> {
    let now = now_ms();
    let mut changed = Vec::new();
    for (rank, item) in items.iter_mut().enumerate() {
        let rank = rank as u32;
        if item.order() != rank {
            item.set_order(rank);
            item.stamp_updated(now);
            changed.push((item.id().to_string(), item.to_fields()));
        }
    }
    changed
}

/// Write all changed ranks concurrently. Succeeds only if every write
/// succeeds. On partial failure the optimistic local order is kept; some
/// writes may have landed, so reverting locally would only guess, and the
/// caller resyncs via `reload`.
async fn persist_ranks(
    store: &dyn DocumentStore,
    collection: &str,
    changed: &[(String, Value)],
) -> DomainResult<()> {
    let results = join_all(
        changed
            .iter()
            .map(|(id, fields)| store.update(collection, id, fields.clone())),
    )
    .await;
    let failures = results.iter().filter(|r| r.is_err()).count();
    if let Some(first) = results.iter().find_map(|r| r.as_ref().err()) {
        return Err(DomainError::Persistence(format!(
            "{} of {} rank updates failed: {}",
            failures,
            changed.len(),
            first
        )));
    }
    Ok(())
}
