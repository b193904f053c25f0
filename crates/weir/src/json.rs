//! JSON boundary: the dashboard's data layer hands over labelled nodes and links.

use crate::config::LayoutConfig;
use crate::layout::layout;
use crate::model::{Pin, RenderMode, SankeyDiagramLayout, SankeyInput, SankeyLink, SankeyNode};
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SemanticModel {
    #[serde(default)]
    nodes: Vec<SemanticNode>,
    #[serde(default)]
    links: Vec<SemanticLink>,
    #[serde(default)]
    structure_only: bool,
    #[serde(default)]
    strict_nodes: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SemanticNode {
    label: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    show_unit: bool,
    #[serde(default)]
    show_total: bool,
    #[serde(default)]
    pin: Pin,
    #[serde(default)]
    fixed_row: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct SemanticLink {
    source: String,
    target: String,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    color: String,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Default)]
struct NodeTable {
    nodes: Vec<SankeyNode>,
    by_label: FxHashMap<String, usize>,
}

impl NodeTable {
    fn insert(&mut self, node: SankeyNode) -> Result<usize> {
        if self.by_label.contains_key(&node.label) {
            return Err(Error::InvalidModel {
                message: format!("duplicate node label {}", node.label),
            });
        }
        let idx = self.nodes.len();
        self.by_label.insert(node.label.clone(), idx);
        self.nodes.push(node);
        Ok(idx)
    }

    fn resolve(&mut self, label: &str, strict: bool) -> Result<usize> {
        if let Some(&idx) = self.by_label.get(label) {
            return Ok(idx);
        }
        if strict {
            return Err(Error::UnknownNode {
                label: label.to_string(),
            });
        }
        self.insert(SankeyNode::new(label))
    }
}

/// Converts a labelled semantic model into engine input plus the requested mode.
pub fn parse_input(semantic: &Value) -> Result<(SankeyInput, RenderMode)> {
    let model: SemanticModel = serde_json::from_value(Value::clone(semantic))?;

    let mut table = NodeTable::default();
    for n in model.nodes {
        table.insert(SankeyNode {
            label: n.label,
            color: n.color,
            unit: n.unit,
            show_unit: n.show_unit,
            show_total: n.show_total,
            pin: n.pin,
            fixed_row: n.fixed_row,
        })?;
    }

    let mut links: Vec<SankeyLink> = Vec::with_capacity(model.links.len());
    for l in model.links {
        let source = table.resolve(&l.source, model.strict_nodes)?;
        let target = table.resolve(&l.target, model.strict_nodes)?;
        links.push(SankeyLink {
            source,
            target,
            value: l.value.as_f64().unwrap_or(0.0),
            color: l.color,
            unit: l.unit,
        });
    }

    Ok((
        SankeyInput {
            nodes: table.nodes,
            links,
        },
        RenderMode::from_structure_only(model.structure_only),
    ))
}

/// Lays out a semantic model under an effective config (see [`LayoutConfig::from_value`]).
pub fn layout_json(semantic: &Value, effective_config: &Value) -> Result<SankeyDiagramLayout> {
    let (input, mode) = parse_input(semantic)?;
    let config = LayoutConfig::from_value(effective_config);
    Ok(layout(&input, mode, &config).diagram())
}
