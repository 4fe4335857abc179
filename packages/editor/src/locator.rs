//! # Tree Locator
//!
//! Resolves structural context from a cursor position: the nearest enclosing
//! node of a requested kind, and (row, column) coordinates for table cells.
//!
//! Every miss is an explicit `None`, never an error — callers treat `None`
//! as "operation not applicable here".

use folio_schema::{Node, NodeKind, NodePath, Position};

/// A located ancestor: its path and a borrow of the node itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<'a> {
    pub path: NodePath,
    pub node: &'a Node,
}

/// Zero-based coordinates of a cell within its table: the row's index among
/// the table's rows and the cell's index among that row's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoords {
    pub row_index: usize,
    pub col_index: usize,
}

/// Find the nearest enclosing node of `kind`, starting at the position's own
/// node and walking the ancestor chain outward.
pub fn find_enclosing<'a>(
    doc: &'a Node,
    position: &Position,
    kind: NodeKind,
) -> Option<Found<'a>> {
    for len in (0..=position.path.len()).rev() {
        let path = position.path.truncated(len);
        if let Some(node) = doc.node_at(&path) {
            if node.kind() == kind {
                return Some(Found { path, node });
            }
        }
    }
    None
}

/// Resolve the (row, column) coordinates of the cell enclosing `position`.
///
/// `None` if the position is not inside a `tableCell`/`tableHeader` that
/// sits in a `tableRow` inside a `table`.
pub fn cell_coordinates(doc: &Node, position: &Position) -> Option<CellCoords> {
    for len in (0..=position.path.len()).rev() {
        let path = position.path.truncated(len);
        let Some(node) = doc.node_at(&path) else {
            continue;
        };
        if !matches!(node.kind(), NodeKind::TableCell | NodeKind::TableHeader) {
            continue;
        }

        let col_index = path.last()?;
        let row_path = path.parent()?;
        if doc.node_at(&row_path)?.kind() != NodeKind::TableRow {
            return None;
        }
        let row_index = row_path.last()?;
        let table_path = row_path.parent()?;
        if doc.node_at(&table_path)?.kind() != NodeKind::Table {
            return None;
        }

        return Some(CellCoords {
            row_index,
            col_index,
        });
    }
    None
}
