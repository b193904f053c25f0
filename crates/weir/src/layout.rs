//! Layout context and pipeline.

use crate::config::LayoutConfig;
use crate::graphlib::NodeId;
use crate::model::{RenderMode, SankeyDiagramLayout, SankeyInput};
use crate::state::{self, SankeyGraph};
use crate::{assemble, breadth, cycles, depth, link_depth, value};

/// A computed layout plus everything needed to recompute or adjust it.
///
/// The context owns a private copy of the input and the working graph, so a layout can be
/// repositioned interactively without touching the caller's data.
#[derive(Debug, Clone)]
pub struct SankeyLayout {
    input: SankeyInput,
    mode: RenderMode,
    config: LayoutConfig,
    graph: SankeyGraph,
}

/// Lays out `input` from scratch.
pub fn layout(input: &SankeyInput, mode: RenderMode, config: &LayoutConfig) -> SankeyLayout {
    SankeyLayout::new(input.clone(), mode, config.clone())
}

impl SankeyLayout {
    pub fn new(input: SankeyInput, mode: RenderMode, config: LayoutConfig) -> Self {
        let mut layout = Self {
            input,
            mode,
            config,
            graph: SankeyGraph::new(),
        };
        layout.relayout();
        layout
    }

    /// Recomputes the whole layout from the retained input, discarding any repositioning.
    pub fn relayout(&mut self) {
        let _span = tracing::debug_span!(
            "sankey_layout",
            nodes = self.input.nodes.len(),
            links = self.input.links.len(),
            mode = ?self.mode
        )
        .entered();

        let mut g = state::build_graph(&self.input);
        value::run(&mut g, self.mode);
        cycles::run(&mut g);
        breadth::run(&mut g, &self.config);
        depth::run(&mut g, self.mode, &self.config);

        tracing::debug!(
            nodes = g.node_count(),
            links = g.link_count(),
            "sankey: layout complete"
        );
        self.graph = g;
    }

    /// Moves one node vertically and restacks the links; nothing else is recomputed.
    ///
    /// `index` refers to [`SankeyDiagramLayout::nodes`]. Out-of-range indices and non-finite
    /// coordinates are ignored. Returns whether the node moved.
    pub fn reposition(&mut self, index: usize, y: f64) -> bool {
        if !y.is_finite() {
            return false;
        }
        let Some(node) = self.graph.node_mut(NodeId::new(index)) else {
            tracing::debug!(index, "sankey: reposition ignored, no such node");
            return false;
        };
        node.y = y;
        link_depth::run(&mut self.graph, self.mode);
        true
    }

    pub fn diagram(&self) -> SankeyDiagramLayout {
        assemble::run(&self.graph, self.mode, &self.config)
    }

    pub fn graph(&self) -> &SankeyGraph {
        &self.graph
    }

    pub fn input(&self) -> &SankeyInput {
        &self.input
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }
}
