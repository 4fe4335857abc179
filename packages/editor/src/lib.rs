//! # Folio Editor
//!
//! Core document editing engine for Folio.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: typed node tree + validation        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + transforms     │
//! │  - Load/save/publish snapshots              │
//! │  - Apply splices with validation            │
//! │  - Table transforms (sort/fill/format)      │
//! │  - Coordinate commit → render pipeline      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: node tree → render tree           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The node tree is source of truth**: render output is a derived view
//! 2. **Commits are whole-subtree splices**: compute new nodes, splice, validate
//! 3. **Validation before mutation**: an illegal splice leaves the tree untouched
//! 4. **One renderer**: editor preview and published pages share the same code path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Document, MemoryStore, Pipeline, SortDirection, sort_by_column};
//! use folio_renderer::ComponentRegistry;
//!
//! let mut store = MemoryStore::new();
//! let mut pipeline = Pipeline::new(Document::load("pricing-page", &store)?);
//!
//! // Sort the table under the cursor by its first column.
//! if let Some(splice) = sort_by_column(
//!     pipeline.document().root(),
//!     &table_path,
//!     0,
//!     SortDirection::Asc,
//!     None,
//! ) {
//!     let result = pipeline.apply(&splice, &ComponentRegistry::new())?;
//!     println!("now at version {}", result.version);
//! }
//!
//! pipeline.document_mut().publish(&mut store)?;
//! ```

mod document;
mod errors;
mod locator;
mod number;
mod paste;
mod pipeline;
mod splice;
mod transforms;
mod undo_stack;

pub use document::{Document, MemoryStore, SnapshotStore};
pub use errors::EditorError;
pub use locator::{cell_coordinates, find_enclosing, CellCoords, Found};
pub use number::{
    format_currency, format_number, format_percent, parse_numeric, Locale, ParsedNumber,
};
pub use paste::paste_tabular;
pub use pipeline::{Pipeline, PipelineResult};
pub use splice::Splice;
pub use transforms::{
    apply_column_attr, fill_down, fill_right, format_column, replace_with_matrix, sort_by_column,
    ColumnAttr, ColumnFormat, Observer, SortDirection, TransformEvent,
};
pub use undo_stack::UndoStack;

// Re-export common types for convenience
pub use folio_renderer::{ComponentRegistry, RenderNode, SectionComponent};
pub use folio_schema::{Node, NodeKind, NodePath, Position};
