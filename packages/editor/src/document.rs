//! # Document Handle
//!
//! The editing-session view of one document: the current root, a version
//! counter, dirty tracking, and an undo stack of prior snapshots.
//!
//! ## Lifecycle
//!
//! ```text
//! Create/Load → Commit splices → Autosave draft → Publish
//!      ↓              ↓                ↓              ↓
//!   empty doc     new root per     draft snapshot  frozen numbered
//!   or snapshot   commit           in the store    version snapshot
//! ```
//!
//! Content is versioned, never mutated in place: each commit produces a new
//! root, and publishing freezes the current root into an immutable version
//! record. Persistence itself lives behind [`SnapshotStore`].

use crate::errors::EditorError;
use crate::splice::Splice;
use crate::undo_stack::UndoStack;
use folio_schema::{validate, Node};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Persistence collaborator boundary. Snapshots are opaque JSON conforming
/// to the node schema; the core never talks to storage directly.
pub trait SnapshotStore {
    /// Latest draft snapshot for a document, if any.
    fn load(&self, document_id: &str) -> Result<Option<Value>, EditorError>;

    fn save_draft(&mut self, document_id: &str, snapshot: &Value) -> Result<(), EditorError>;

    /// Freeze an immutable, numbered version snapshot.
    fn save_version(
        &mut self,
        document_id: &str,
        version: u64,
        snapshot: &Value,
    ) -> Result<(), EditorError>;
}

/// In-memory store, for tests and temporary documents.
#[derive(Debug, Default)]
pub struct MemoryStore {
    drafts: HashMap<String, Value>,
    versions: HashMap<(String, u64), Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self, document_id: &str, version: u64) -> Option<&Value> {
        self.versions.get(&(document_id.to_string(), version))
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, document_id: &str) -> Result<Option<Value>, EditorError> {
        Ok(self.drafts.get(document_id).cloned())
    }

    fn save_draft(&mut self, document_id: &str, snapshot: &Value) -> Result<(), EditorError> {
        self.drafts.insert(document_id.to_string(), snapshot.clone());
        Ok(())
    }

    fn save_version(
        &mut self,
        document_id: &str,
        version: u64,
        snapshot: &Value,
    ) -> Result<(), EditorError> {
        self.versions
            .insert((document_id.to_string(), version), snapshot.clone());
        Ok(())
    }
}

/// Editable Folio document.
#[derive(Debug)]
pub struct Document {
    pub id: String,

    /// Increments on every commit, undo, and redo.
    pub version: u64,

    root: Node,
    dirty: bool,
    undo: UndoStack,
}

impl Document {
    /// A fresh document: a `doc` holding one empty paragraph.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 0,
            root: Node::doc(vec![Node::paragraph(vec![])]),
            dirty: false,
            undo: UndoStack::new(),
        }
    }

    /// Rehydrate from a persisted snapshot, validating on the way in.
    pub fn from_snapshot(id: impl Into<String>, snapshot: Value) -> Result<Self, EditorError> {
        let root = Node::from_json(snapshot)?;
        validate(&root)?;
        Ok(Self {
            id: id.into(),
            version: 0,
            root,
            dirty: false,
            undo: UndoStack::new(),
        })
    }

    /// Load the draft snapshot from the store.
    pub fn load(id: &str, store: &dyn SnapshotStore) -> Result<Self, EditorError> {
        let snapshot = store
            .load(id)?
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;
        Self::from_snapshot(id, snapshot)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Apply a splice: the new root fully replaces the old one, which is
    /// kept on the undo stack.
    pub fn commit(&mut self, splice: &Splice) -> Result<u64, EditorError> {
        let new_root = splice.apply(&self.root)?;
        let prior = std::mem::replace(&mut self.root, new_root);
        self.undo.record(prior);
        self.version += 1;
        self.dirty = true;
        debug!(id = %self.id, version = self.version, parent = %splice.parent, "committed splice");
        Ok(self.version)
    }

    /// Restore the most recent prior snapshot. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.root.clone();
        match self.undo.undo(current) {
            Some(prior) => {
                self.root = prior;
                self.version += 1;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.root.clone();
        match self.undo.redo(current) {
            Some(next) => {
                self.root = next;
                self.version += 1;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Current tree as an immutable JSON snapshot.
    pub fn snapshot(&self) -> Result<Value, EditorError> {
        Ok(self.root.to_json()?)
    }

    /// Autosave the working draft.
    pub fn save_draft(&mut self, store: &mut dyn SnapshotStore) -> Result<(), EditorError> {
        let snapshot = self.snapshot()?;
        store.save_draft(&self.id, &snapshot)?;
        self.dirty = false;
        debug!(id = %self.id, version = self.version, "saved draft");
        Ok(())
    }

    /// Freeze the current tree into an immutable version record and return
    /// its number.
    pub fn publish(&mut self, store: &mut dyn SnapshotStore) -> Result<u64, EditorError> {
        let snapshot = self.snapshot()?;
        store.save_version(&self.id, self.version, &snapshot)?;
        store.save_draft(&self.id, &snapshot)?;
        self.dirty = false;
        debug!(id = %self.id, version = self.version, "published version");
        Ok(self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_schema::NodePath;

    fn paragraph_splice(index: usize, text: &str) -> Splice {
        Splice {
            parent: NodePath::root(),
            range: index..index + 1,
            nodes: vec![Node::paragraph_text(text)],
        }
    }

    #[test]
    fn test_empty_document_is_valid() {
        let doc = Document::empty("doc-1");
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(validate(doc.root()).is_ok());
    }

    #[test]
    fn test_commit_bumps_version_and_keeps_undo() {
        let mut doc = Document::empty("doc-1");
        doc.commit(&paragraph_splice(0, "hello")).unwrap();

        assert_eq!(doc.version, 1);
        assert!(doc.is_dirty());
        assert_eq!(doc.root().content()[0].text_content(), "hello");

        assert!(doc.undo());
        assert_eq!(doc.root().content()[0].text_content(), "");
        assert!(doc.redo());
        assert_eq!(doc.root().content()[0].text_content(), "hello");
    }

    #[test]
    fn test_failed_commit_leaves_document_untouched() {
        let mut doc = Document::empty("doc-1");
        let bad = Splice {
            parent: NodePath::root(),
            range: 0..1,
            nodes: vec![Node::text("loose inline")],
        };
        assert!(doc.commit(&bad).is_err());
        assert_eq!(doc.version, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_snapshot_round_trip_through_store() {
        let mut store = MemoryStore::new();
        let mut doc = Document::empty("doc-1");
        doc.commit(&paragraph_splice(0, "draft text")).unwrap();
        doc.save_draft(&mut store).unwrap();
        assert!(!doc.is_dirty());

        let reloaded = Document::load("doc-1", &store).unwrap();
        assert_eq!(reloaded.root(), doc.root());
    }

    #[test]
    fn test_publish_freezes_numbered_version() {
        let mut store = MemoryStore::new();
        let mut doc = Document::empty("doc-1");
        doc.commit(&paragraph_splice(0, "v1 body")).unwrap();

        let version = doc.publish(&mut store).unwrap();
        assert_eq!(version, 1);

        // Later edits do not disturb the frozen snapshot.
        doc.commit(&paragraph_splice(0, "v2 body")).unwrap();
        let frozen = store.version("doc-1", 1).unwrap();
        let frozen_doc = Node::from_json(frozen.clone()).unwrap();
        assert_eq!(frozen_doc.content()[0].text_content(), "v1 body");
    }

    #[test]
    fn test_load_missing_document_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            Document::load("ghost", &store),
            Err(EditorError::NotFound(_))
        ));
    }

    #[test]
    fn test_from_snapshot_rejects_illegal_tree() {
        let bad = serde_json::json!({
            "type": "table",
            "content": [{"type": "paragraph"}]
        });
        assert!(matches!(
            Document::from_snapshot("doc-1", bad),
            Err(EditorError::Schema(_))
        ));
    }
}
