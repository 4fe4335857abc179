//! # Undo/Redo Stack
//!
//! Tracks prior immutable root snapshots and enables undo/redo.
//!
//! ## Design
//!
//! - Every commit records the pre-commit root (commits already clone the
//!   tree, so snapshots are cheap to keep)
//! - Undo hands back the prior root and parks the current one for redo
//! - New commits clear the redo stack

use folio_schema::Node;

/// Undo/redo stack over whole-document snapshots.
#[derive(Debug)]
pub struct UndoStack {
    /// Prior roots, most recent last.
    undo_stack: Vec<Node>,

    /// Undone roots, most recent last.
    redo_stack: Vec<Node>,

    /// Maximum number of undo levels (0 = unlimited).
    max_levels: usize,
}

impl UndoStack {
    /// Default cap of 100 levels.
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the root that a commit is about to replace.
    pub fn record(&mut self, prior: Node) {
        self.undo_stack.push(prior);
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }
        // New action invalidates the redo future.
        self.redo_stack.clear();
    }

    /// Swap back to the most recent prior root. `current` is parked for
    /// redo. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Node) -> Option<Node> {
        let prior = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(prior)
    }

    /// Reapply the most recently undone root.
    pub fn redo(&mut self, current: Node) -> Option<Node> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
