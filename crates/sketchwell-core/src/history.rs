//! Snapshot-based undo/redo history.

use crate::document::Document;

/// Maximum number of snapshots retained.
pub const MAX_HISTORY: usize = 30;

/// A bounded stack of full document snapshots with a cursor.
///
/// Entries are value copies and never mutated once pushed; committing after
/// an undo truncates the abandoned branch. Only gesture-boundary mutations
/// commit — intra-gesture deltas bypass history entirely.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Document>,
    cursor: usize,
}

impl History {
    /// Create a history seeded with the initial state, so undoing the first
    /// gesture can reach it.
    pub fn new(initial: Document) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record a new state: drop everything after the cursor, append, and
    /// advance. The oldest entry is dropped once the stack exceeds
    /// [`MAX_HISTORY`].
    pub fn commit(&mut self, state: Document) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor += 1;

        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one entry. Returns the snapshot to restore, or None at the
    /// oldest retained state.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry. Returns the snapshot to restore, or None at
    /// the tip.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Whether undo would change state.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether redo would change state.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Histories are never empty: at minimum the seed entry remains.
    pub fn is_empty(&self) -> bool {
        false
    }
}
