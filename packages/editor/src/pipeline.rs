//! # Editing Pipeline
//!
//! Coordinates the edit-time loop: commit a splice, re-render through the
//! injected component registry, cache the last output.
//!
//! The published page calls the very same [`folio_renderer::render`] on the
//! frozen snapshot, which is what keeps editor preview and published output
//! in sync — there is no second rendering path to drift.

use crate::document::Document;
use crate::errors::EditorError;
use crate::splice::Splice;
use folio_renderer::{render, ComponentRegistry, RenderNode};

/// Manages the commit → render loop for one document.
pub struct Pipeline {
    document: Document,
    last_output: Option<RenderNode>,
}

/// Result of one pipeline pass.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub version: u64,
    pub output: RenderNode,
}

impl Pipeline {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            last_output: None,
        }
    }

    /// Commit a splice and produce the fresh preview output.
    pub fn apply(
        &mut self,
        splice: &Splice,
        registry: &ComponentRegistry,
    ) -> Result<PipelineResult, EditorError> {
        let version = self.document.commit(splice)?;
        let output = self.render_current(registry);
        self.last_output = Some(output.clone());
        Ok(PipelineResult { version, output })
    }

    /// Full re-render without an edit (initial render, recovery).
    pub fn full_render(&mut self, registry: &ComponentRegistry) -> RenderNode {
        let output = self.render_current(registry);
        self.last_output = Some(output.clone());
        output
    }

    fn render_current(&self, registry: &ComponentRegistry) -> RenderNode {
        // A doc root always renders to an element; the fallback is for type
        // completeness only.
        render(self.document.root(), registry)
            .unwrap_or_else(|| RenderNode::element("article"))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn last_output(&self) -> Option<&RenderNode> {
        self.last_output.as_ref()
    }

    pub fn clear_cache(&mut self) {
        self.last_output = None;
    }
}
