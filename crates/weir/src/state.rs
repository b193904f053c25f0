//! Working graph of a layout pass.
//!
//! Input records are copied into a [`FlowGraph`] arena; every stage reads and writes the
//! `NodeState` / `LinkState` labels through handles, so the caller's input is never mutated.

use crate::graphlib::{FlowGraph, NodeId};
use crate::model::{Pin, SankeyInput};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeState {
    /// Index of the node in the caller's input.
    pub input: usize,
    pub label: String,
    pub color: String,
    pub unit: String,
    pub show_unit: bool,
    pub show_total: bool,
    pub pin: Pin,
    pub fixed_row: bool,

    pub value: f64,
    pub layer: usize,
    pub x: f64,
    pub y: f64,
    pub dy: f64,
}

impl NodeState {
    pub fn center(&self) -> f64 {
        self.y + self.dy / 2.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkState {
    /// Index of the link in the caller's input.
    pub input: usize,
    pub value: f64,
    pub color: String,
    pub unit: String,

    pub causes_cycle: bool,
    pub cycle_index: Option<usize>,
    pub dy: f64,
    pub sy: f64,
    pub ty: f64,
}

pub type SankeyGraph = FlowGraph<NodeState, LinkState>;

/// Copies the caller's records into a fresh arena and links nodes to their flows.
///
/// Links with an endpoint outside the node list are dropped. Non-finite or negative values
/// become 0.
pub fn build_graph(input: &SankeyInput) -> SankeyGraph {
    let mut g: SankeyGraph = FlowGraph::with_capacity(input.nodes.len(), input.links.len());

    for (i, n) in input.nodes.iter().enumerate() {
        g.add_node(NodeState {
            input: i,
            label: n.label.clone(),
            color: n.color.clone(),
            unit: n.unit.clone(),
            show_unit: n.show_unit,
            show_total: n.show_total,
            pin: n.pin,
            fixed_row: n.fixed_row,
            ..Default::default()
        });
    }

    for (i, l) in input.links.iter().enumerate() {
        let value = if l.value.is_finite() && l.value >= 0.0 {
            l.value
        } else {
            tracing::warn!(link = i, value = l.value, "sankey link value clamped to 0");
            0.0
        };
        let label = LinkState {
            input: i,
            value,
            color: l.color.clone(),
            unit: l.unit.clone(),
            ..Default::default()
        };
        if g
            .add_link(NodeId::new(l.source), NodeId::new(l.target), label)
            .is_none()
        {
            tracing::warn!(
                link = i,
                source = l.source,
                target = l.target,
                nodes = input.nodes.len(),
                "sankey link dropped: endpoint out of range"
            );
        }
    }

    g.compute_linkage();
    g
}
