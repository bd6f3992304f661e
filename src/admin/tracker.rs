//! Per-Item Save Tracker
//!
//! Independent dirty/saving flags per item id, so edits and saves across a
//! long list never interfere with each other. Each collection admin owns
//! one tracker; there is no global instance.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
struct ItemSaveState {
    dirty: bool,
    saving: bool,
    /// Edit generation, bumped on every local edit.
    edits: u64,
    /// Generation captured when the in-flight save began.
    edits_at_save: u64,
}

/// Tracks unsaved edits and in-flight saves per item id
#[derive(Debug, Default)]
pub struct SaveTracker {
    states: HashMap<String, ItemSaveState>,
}

impl SaveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a local edit to this item.
    pub fn mark_dirty(&mut self, id: &str) {
        let state = self.states.entry(id.to_string()).or_default();
        state.dirty = true;
        state.edits += 1;
    }

    /// Try to start a save. Returns `false` when one is already in flight
    /// for this id; the caller must not fire a second write then.
    pub fn begin_save(&mut self, id: &str) -> bool {
        let state = self.states.entry(id.to_string()).or_default();
        if state.saving {
            return false;
        }
        state.saving = true;
        state.edits_at_save = state.edits;
        true
    }

    /// Record save completion, success or failure, so the saving flag can
    /// never stick. A successful save clears `dirty` only when no edit
    /// arrived after the save began; those edits still need saving.
    pub fn end_save(&mut self, id: &str, succeeded: bool) {
        if let Some(state) = self.states.get_mut(id) {
            state.saving = false;
            if succeeded && state.edits == state.edits_at_save {
                state.dirty = false;
            }
        }
    }

    pub fn is_dirty(&self, id: &str) -> bool {
        self.states.get(id).map(|s| s.dirty).unwrap_or(false)
    }

    pub fn is_saving(&self, id: &str) -> bool {
        self.states.get(id).map(|s| s.saving).unwrap_or(false)
    }

    /// Ids that still have unsaved edits.
    pub fn dirty_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .states
            .iter()
            .filter(|(_, s)| s.dirty)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Drop all state for an id, typically after the item was deleted.
    pub fn forget(&mut self, id: &str) {
        self.states.remove(id);
    }
}
