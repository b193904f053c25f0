//! Input records handed to the engine and the flat, index-based layout it hands back.

use serde::{Deserialize, Serialize};

/// Side constraint of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pin {
    /// Layer follows from connectivity. Sticking to the left needs no extra work, so `left`
    /// is the same thing.
    #[default]
    #[serde(alias = "none", alias = "left")]
    Free,
    /// Always placed in the rightmost column.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Node heights and link thicknesses follow the flow values.
    #[default]
    Proportional,
    /// Every node and link has the same size; only the topology is shown.
    Structure,
}

impl RenderMode {
    pub fn from_structure_only(structure_only: bool) -> Self {
        if structure_only {
            Self::Structure
        } else {
            Self::Proportional
        }
    }

    pub fn is_structure(self) -> bool {
        matches!(self, Self::Structure)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyNode {
    pub label: String,
    pub color: String,
    pub unit: String,
    pub show_unit: bool,
    pub show_total: bool,
    pub pin: Pin,
    pub fixed_row: bool,
}

impl SankeyNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// A flow between two input nodes, referenced by their index in [`SankeyInput::nodes`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub color: String,
    pub unit: String,
}

impl SankeyLink {
    pub fn new(source: usize, target: usize, value: f64) -> Self {
        Self {
            source,
            target,
            value,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyInput {
    pub nodes: Vec<SankeyNode>,
    pub links: Vec<SankeyLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLayout {
    /// Index of the node in [`SankeyInput::nodes`]. Unconnected nodes are pruned, so this can
    /// differ from the node's position in the output.
    pub input_index: usize,
    pub label: String,
    pub color: String,
    pub value: f64,
    pub unit: String,
    pub show_unit: bool,
    pub show_total: bool,
    pub pin: Pin,
    pub fixed_row: bool,
    /// Column index.
    pub layer: usize,
    pub x: f64,
    pub y: f64,
    pub dy: f64,
    /// Indices into [`SankeyDiagramLayout::links`], in stacking order.
    pub incoming: Vec<usize>,
    /// Indices into [`SankeyDiagramLayout::links`], in stacking order.
    pub outgoing: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkLayout {
    /// Index of the link in [`SankeyInput::links`].
    pub input_index: usize,
    /// Index into [`SankeyDiagramLayout::nodes`].
    pub source: usize,
    /// Index into [`SankeyDiagramLayout::nodes`].
    pub target: usize,
    pub value: f64,
    pub color: String,
    pub unit: String,
    pub causes_cycle: bool,
    /// 1-based discovery order among cycle-causing links.
    pub cycle_index: Option<usize>,
    pub dy: f64,
    /// Offset of the ribbon's top edge from the source node's top.
    pub sy: f64,
    /// Offset of the ribbon's top edge from the target node's top.
    pub ty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyDiagramLayout {
    pub mode: RenderMode,
    pub bounds: Option<Bounds>,
    pub node_width: f64,
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
}
