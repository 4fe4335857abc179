use crate::node::Node;
use serde::{Deserialize, Serialize};

/// Address of a node: the sequence of child indices from the root.
///
/// Paths are the only addressing mechanism; nodes carry no persistent ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    pub fn new(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Child index within the parent, `None` at the root.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node, `None` at the root.
    pub fn parent(&self) -> Option<NodePath> {
        if self.0.is_empty() {
            None
        } else {
            Some(NodePath(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Extend by one child index.
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Leading sub-path of the given length.
    pub fn truncated(&self, len: usize) -> NodePath {
        NodePath(self.0[..len.min(self.0.len())].to_vec())
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        NodePath(indices)
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        NodePath(indices.to_vec())
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

/// A cursor/selection location: a node path plus a character offset inside
/// that node (offset is opaque to the locator, which only walks the path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub path: NodePath,
    #[serde(default)]
    pub offset: usize,
}

impl Position {
    pub fn at(path: impl Into<NodePath>) -> Self {
        Position {
            path: path.into(),
            offset: 0,
        }
    }
}

impl Node {
    /// Resolve a path to the node it addresses.
    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let mut current = self;
        for &index in path.as_slice() {
            current = current.content().get(index)?;
        }
        Some(current)
    }

    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut current = self;
        for &index in path.as_slice() {
            current = current.content_mut()?.get_mut(index)?;
        }
        Some(current)
    }
}
