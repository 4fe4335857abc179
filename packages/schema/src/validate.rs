use crate::node::{Mark, MarkKind, Node, NodeKind};
use crate::path::NodePath;
use thiserror::Error;

/// A tree failed structural validation. This is a programming or
/// data-corruption error; callers that persist or load trees surface it
/// rather than silently repairing the tree.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("schema violation at {path}: {reason}")]
pub struct SchemaViolation {
    pub path: NodePath,
    pub reason: String,
}

impl SchemaViolation {
    fn new(path: &NodePath, reason: impl Into<String>) -> Self {
        SchemaViolation {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// Whether `child` may appear directly under `parent`.
fn allowed_child(parent: NodeKind, child: NodeKind) -> bool {
    use NodeKind::*;
    match parent {
        Doc => matches!(
            child,
            Paragraph
                | Heading
                | BulletList
                | OrderedList
                | TaskList
                | Table
                | CodeBlock
                | Blockquote
                | HorizontalRule
                | Section
        ),
        // Inline content only.
        Paragraph | Heading => matches!(child, Text | Image),
        BulletList | OrderedList => child == ListItem,
        TaskList => child == TaskItem,
        ListItem | TaskItem => matches!(
            child,
            Paragraph | Heading | BulletList | OrderedList | TaskList | CodeBlock | Blockquote
        ),
        Table => child == TableRow,
        TableRow => matches!(child, TableCell | TableHeader),
        TableCell | TableHeader => matches!(
            child,
            Paragraph | Heading | BulletList | OrderedList | TaskList | CodeBlock | Blockquote
        ),
        CodeBlock => child == Text,
        Blockquote => matches!(
            child,
            Paragraph | Heading | BulletList | OrderedList | TaskList | CodeBlock
        ),
        // Leaves.
        Text | Image | HorizontalRule | Section => false,
    }
}

/// Recursively check a tree for structural legality.
///
/// Checks, per node: child-type membership in the parent's allowed set,
/// heading levels 1..=6, at most one mark of each kind on a text run, a
/// non-empty `component_key` on sections, and colspan/rowspan-coherent
/// column counts across every row of a table.
pub fn validate(node: &Node) -> Result<(), SchemaViolation> {
    validate_at(node, &NodePath::root())
}

fn validate_at(node: &Node, path: &NodePath) -> Result<(), SchemaViolation> {
    match node {
        Node::Heading { attrs, .. } => {
            if !(1..=6).contains(&attrs.level) {
                return Err(SchemaViolation::new(
                    path,
                    format!("heading level {} out of range 1..=6", attrs.level),
                ));
            }
        }
        Node::Text { text, marks } => {
            if text.is_empty() {
                return Err(SchemaViolation::new(path, "empty text node"));
            }
            check_mark_uniqueness(marks, path)?;
        }
        Node::Section { attrs } => {
            if attrs.component_key.is_empty() {
                return Err(SchemaViolation::new(path, "section with empty componentKey"));
            }
        }
        Node::Table { content, .. } => {
            check_column_coherence(content, path)?;
        }
        _ => {}
    }

    let kind = node.kind();
    for (index, child) in node.content().iter().enumerate() {
        let child_path = path.child(index);
        if !allowed_child(kind, child.kind()) {
            return Err(SchemaViolation::new(
                &child_path,
                format!("{} is not a legal child of {}", child.kind(), kind),
            ));
        }
        validate_at(child, &child_path)?;
    }

    Ok(())
}

fn check_mark_uniqueness(marks: &[Mark], path: &NodePath) -> Result<(), SchemaViolation> {
    let mut seen: Vec<MarkKind> = Vec::with_capacity(marks.len());
    for mark in marks {
        let kind = mark.kind();
        if seen.contains(&kind) {
            return Err(SchemaViolation::new(
                path,
                format!("duplicate mark of kind {:?}", kind),
            ));
        }
        seen.push(kind);
    }
    Ok(())
}

/// Every row, once colspans and carried rowspans are accounted for, must
/// resolve to the same total column count.
fn check_column_coherence(rows: &[Node], path: &NodePath) -> Result<(), SchemaViolation> {
    // Cells spanning into later rows: (remaining rows, columns occupied).
    let mut pending: Vec<(u32, u32)> = Vec::new();
    let mut expected: Option<u32> = None;

    for (row_index, row) in rows.iter().enumerate() {
        // Consume one row's worth of every carried span before counting.
        let carried: u32 = pending.iter().map(|(_, cols)| cols).sum();
        pending.retain_mut(|(remaining, _)| {
            *remaining -= 1;
            *remaining > 0
        });
        let mut width = carried;

        for cell in row.content() {
            let (colspan, rowspan) = match cell {
                Node::TableCell { attrs, .. } | Node::TableHeader { attrs, .. } => {
                    (attrs.colspan, attrs.rowspan)
                }
                // Illegal children are reported by the legality walk.
                _ => continue,
            };
            width += colspan;
            if rowspan > 1 {
                pending.push((rowspan - 1, colspan));
            }
        }

        match expected {
            None => expected = Some(width),
            Some(count) if count != width => {
                return Err(SchemaViolation::new(
                    &path.child(row_index),
                    format!("row resolves to {} columns, expected {}", width, count),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(())
}
