//! # Folio Renderer
//!
//! Walks a validated document tree and produces a presentation tree,
//! identically shaped whether the consumer is the live editor's read-only
//! preview or the published static page.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Rendering is fully deterministic.**
//!
//! For any tree that passed schema validation and any registry,
//! [`render`] MUST produce identical output on every invocation:
//!
//! - Same tree → same output structure (byte-for-byte identical when
//!   serialized; attribute and style maps are ordered)
//! - Marks wrap in a fixed order, so nesting is reproducible
//! - No time/random/environment dependence, no mutation of the input
//!
//! This is the property that keeps editor preview and published output in
//! sync: both call the same pure function.
//!
//! ## Section dispatch
//!
//! `section` nodes delegate to an externally supplied [`ComponentRegistry`]
//! keyed by `componentKey`. The registry is injected per call — there is no
//! global component state. Unknown keys render nothing (silent skip).

mod output;
mod registry;
mod render;

pub use output::RenderNode;
pub use registry::{normalize_props, ComponentRegistry, PropField, PropKind, SectionComponent};
pub use render::render;
