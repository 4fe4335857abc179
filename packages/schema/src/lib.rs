//! # Folio Schema
//!
//! The typed, recursive node model for Folio documents.
//!
//! A document is a root `doc` node whose descendants form a tree of blocks
//! (paragraphs, headings, lists, tables, sections), inline content (text
//! with marks, images), and table structure (rows, cells, headers). The
//! persisted unit is an immutable JSON snapshot of the whole tree.
//!
//! ## Core Principles
//!
//! 1. **Closed node set**: every node is one variant of [`Node`]; there is
//!    no open-ended element type.
//! 2. **Path addressing**: nodes are addressed by [`NodePath`] (child
//!    indices from the root), never by a persistent id.
//! 3. **Validate before commit**: every transform runs [`validate`] on the
//!    replacement tree before it is accepted.

mod node;
mod path;
mod validate;

pub use node::{
    CellAttrs, CodeBlockAttrs, HeadingAttrs, HighlightAttrs, ImageAttrs, LinkAttrs, Mark,
    MarkKind, Node, NodeKind, OrderedListAttrs, SectionAttrs, TableAttrs, TaskItemAttrs,
    TextStyleAttrs,
};
pub use path::{NodePath, Position};
pub use validate::{validate, SchemaViolation};
