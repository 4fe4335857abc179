//! # Position-addressed splicing
//!
//! Every transform computes a brand-new subtree and the `[start, end)` child
//! range it replaces. [`Splice::apply`] builds the replacement root from an
//! immutable input and validates it before handing it back; committing the
//! result (and keeping undo snapshots) is the host's job.

use crate::errors::EditorError;
use folio_schema::{validate, Node, NodePath};
use std::ops::Range;

/// A pending tree edit: replace `range` of `parent`'s children with `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Splice {
    pub parent: NodePath,
    pub range: Range<usize>,
    pub nodes: Vec<Node>,
}

impl Splice {
    /// Replace the single node at `path` with `node`. `None` for the root,
    /// which has no parent to splice into.
    pub fn replace_node(path: &NodePath, node: Node) -> Option<Splice> {
        let index = path.last()?;
        Some(Splice {
            parent: path.parent()?,
            range: index..index + 1,
            nodes: vec![node],
        })
    }

    /// Insert `nodes` at `index` under `parent` without removing anything.
    pub fn insert(parent: NodePath, index: usize, nodes: Vec<Node>) -> Splice {
        Splice {
            parent,
            range: index..index,
            nodes,
        }
    }

    /// Compute the replacement root. The input is never mutated; the result
    /// has passed full schema validation.
    pub fn apply(&self, root: &Node) -> Result<Node, EditorError> {
        let mut new_root = root.clone();

        let parent = new_root.node_at_mut(&self.parent).ok_or_else(|| {
            EditorError::InvalidSplice(format!("no node at {}", self.parent))
        })?;
        let children = parent.content_mut().ok_or_else(|| {
            EditorError::InvalidSplice(format!("node at {} is a leaf", self.parent))
        })?;
        if self.range.start > self.range.end || self.range.end > children.len() {
            return Err(EditorError::InvalidSplice(format!(
                "range {}..{} out of bounds for {} children at {}",
                self.range.start,
                self.range.end,
                children.len(),
                self.parent
            )));
        }

        children.splice(self.range.clone(), self.nodes.iter().cloned());

        validate(&new_root)?;
        Ok(new_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> Node {
        Node::doc(vec![
            Node::paragraph_text("one"),
            Node::paragraph_text("two"),
            Node::paragraph_text("three"),
        ])
    }

    #[test]
    fn test_replace_single_node() {
        let doc = sample_doc();
        let splice =
            Splice::replace_node(&NodePath::new(vec![1]), Node::paragraph_text("TWO")).unwrap();

        let new_doc = splice.apply(&doc).unwrap();
        assert_eq!(new_doc.content()[1].text_content(), "TWO");
        // Input untouched.
        assert_eq!(doc.content()[1].text_content(), "two");
    }

    #[test]
    fn test_replace_range_with_different_count() {
        let doc = sample_doc();
        let splice = Splice {
            parent: NodePath::root(),
            range: 0..2,
            nodes: vec![Node::paragraph_text("merged")],
        };

        let new_doc = splice.apply(&doc).unwrap();
        assert_eq!(new_doc.content().len(), 2);
        assert_eq!(new_doc.content()[0].text_content(), "merged");
    }

    #[test]
    fn test_insert_without_removal() {
        let doc = sample_doc();
        let splice = Splice::insert(NodePath::root(), 1, vec![Node::HorizontalRule]);

        let new_doc = splice.apply(&doc).unwrap();
        assert_eq!(new_doc.content().len(), 4);
        assert_eq!(new_doc.content()[1], Node::HorizontalRule);
    }

    #[test]
    fn test_out_of_bounds_range_is_invalid() {
        let doc = sample_doc();
        let splice = Splice {
            parent: NodePath::root(),
            range: 2..5,
            nodes: vec![],
        };
        assert!(matches!(
            splice.apply(&doc),
            Err(EditorError::InvalidSplice(_))
        ));
    }

    #[test]
    fn test_illegal_result_is_rejected() {
        let doc = sample_doc();
        // A bare text node is not a legal child of doc.
        let splice = Splice {
            parent: NodePath::root(),
            range: 0..1,
            nodes: vec![Node::text("loose")],
        };
        assert!(matches!(splice.apply(&doc), Err(EditorError::Schema(_))));
    }

    #[test]
    fn test_replace_node_at_root_is_none() {
        assert!(Splice::replace_node(&NodePath::root(), Node::doc(vec![])).is_none());
    }
}
