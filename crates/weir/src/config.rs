//! Tunable layout constants.
//!
//! The defaults reproduce the energy-system dashboard's look. None of them has an optimality
//! criterion behind it; they are empirical and stay overridable.

use crate::model::RenderMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NODE_WIDTH: f64 = 120.0;
pub const NODE_DISTANCE: f64 = 140.0;
pub const NODE_PADDING: f64 = 16.0;
pub const FIXED_ROW_PADDING: f64 = 40.0;
pub const NODE_MAX_HEIGHT: f64 = 200.0;
pub const STRUCTURE_NODE_HEIGHT: f64 = 30.0;
pub const STRUCTURE_LINK_HEIGHT: f64 = 10.0;
pub const DEPTH_ITERATIONS: usize = 32;
/// Upper bound on relaxation iterations; the cooled pull is negligible long before this.
pub const MAX_DEPTH_ITERATIONS: usize = 1024;
pub const COOLING: f64 = 0.95;
pub const VALUE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Width of a node rectangle.
    pub node_width: f64,
    /// Horizontal gap between two adjacent columns.
    pub node_distance: f64,
    /// Minimum vertical gap between free nodes of one column.
    pub node_padding: f64,
    /// Gap between fixed-row bands, and between the last band and the free nodes.
    pub fixed_row_padding: f64,
    /// Height of the largest node in proportional mode.
    pub node_max_height: f64,
    /// Height of every node in structure-only mode.
    pub structure_node_height: f64,
    /// Height of every link in structure-only mode.
    pub structure_link_height: f64,
    /// Number of relaxation iterations (each one a left-to-right and a right-to-left pass).
    pub iterations: usize,
    /// Factor applied to the relaxation strength after every iteration.
    pub cooling: f64,
    /// Values at or below this are treated as zero.
    pub value_epsilon: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: NODE_WIDTH,
            node_distance: NODE_DISTANCE,
            node_padding: NODE_PADDING,
            fixed_row_padding: FIXED_ROW_PADDING,
            node_max_height: NODE_MAX_HEIGHT,
            structure_node_height: STRUCTURE_NODE_HEIGHT,
            structure_link_height: STRUCTURE_LINK_HEIGHT,
            iterations: DEPTH_ITERATIONS,
            cooling: COOLING,
            value_epsilon: VALUE_EPSILON,
        }
    }
}

fn config_f64(cfg: &Value, path: &[&str]) -> Option<f64> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    cur.as_f64().filter(|v| v.is_finite())
}

fn config_usize(cfg: &Value, path: &[&str]) -> Option<usize> {
    let mut cur = cfg;
    for key in path {
        cur = cur.get(*key)?;
    }
    cur.as_u64().and_then(|v| usize::try_from(v).ok())
}

fn read_iterations(cfg: &Value) -> Option<usize> {
    let iterations = config_usize(cfg, &["sankey", "iterations"])?;
    if iterations > MAX_DEPTH_ITERATIONS {
        tracing::warn!(
            iterations,
            max = MAX_DEPTH_ITERATIONS,
            "sankey: iterations out of range, using the default"
        );
        return None;
    }
    Some(iterations)
}

impl LayoutConfig {
    /// Reads the `sankey` section of an effective-config object.
    ///
    /// Every key is optional; missing, mistyped or non-finite entries keep their default.
    pub fn from_value(effective_config: &Value) -> Self {
        let d = Self::default();
        let f = |key: &str, default: f64| {
            config_f64(effective_config, &["sankey", key]).unwrap_or(default)
        };
        Self {
            node_width: f("nodeWidth", d.node_width),
            node_distance: f("nodeDistance", d.node_distance),
            node_padding: f("nodePadding", d.node_padding),
            fixed_row_padding: f("fixedRowPadding", d.fixed_row_padding),
            node_max_height: f("nodeMaxHeight", d.node_max_height),
            structure_node_height: f("structureNodeHeight", d.structure_node_height),
            structure_link_height: f("structureLinkHeight", d.structure_link_height),
            iterations: read_iterations(effective_config).unwrap_or(d.iterations),
            cooling: f("cooling", d.cooling),
            value_epsilon: f("valueEpsilon", d.value_epsilon),
        }
    }

    /// Relaxation iterations actually run, capped at [`MAX_DEPTH_ITERATIONS`].
    pub fn relaxation_iterations(&self) -> usize {
        self.iterations.min(MAX_DEPTH_ITERATIONS)
    }

    /// Pixel distance between the left edges of two adjacent columns.
    pub fn column_step(&self) -> f64 {
        self.node_width + self.node_distance
    }

    /// Height of the tallest node in the given mode.
    pub fn max_node_height(&self, mode: RenderMode) -> f64 {
        match mode {
            RenderMode::Proportional => self.node_max_height.max(0.0),
            RenderMode::Structure => self.structure_node_height.max(0.0),
        }
    }

    /// Fixed link height used in structure-only mode; never taller than a node.
    pub fn structure_link_height(&self) -> f64 {
        self.structure_link_height
            .max(0.0)
            .min(self.max_node_height(RenderMode::Structure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_reads_the_sankey_section() {
        let cfg = LayoutConfig::from_value(&json!({
            "sankey": { "nodeWidth": 80, "iterations": 4, "cooling": 0.5 }
        }));
        assert_eq!(cfg.node_width, 80.0);
        assert_eq!(cfg.iterations, 4);
        assert_eq!(cfg.cooling, 0.5);
        assert_eq!(cfg.node_padding, NODE_PADDING);
    }

    #[test]
    fn from_value_ignores_mistyped_entries() {
        let cfg = LayoutConfig::from_value(&json!({
            "sankey": { "nodeWidth": "wide", "iterations": -3 }
        }));
        assert_eq!(cfg, LayoutConfig::default());
    }

    #[test]
    fn huge_iteration_counts_fall_back_to_the_default() {
        let cfg = LayoutConfig::from_value(&json!({
            "sankey": { "iterations": 1_000_000_000_000_000_000u64 }
        }));
        assert_eq!(cfg.iterations, DEPTH_ITERATIONS);

        let cfg = LayoutConfig::from_value(&json!({
            "sankey": { "iterations": MAX_DEPTH_ITERATIONS }
        }));
        assert_eq!(cfg.iterations, MAX_DEPTH_ITERATIONS);
    }

    #[test]
    fn relaxation_iterations_are_capped() {
        let cfg = LayoutConfig {
            iterations: usize::MAX,
            ..Default::default()
        };
        assert_eq!(cfg.relaxation_iterations(), MAX_DEPTH_ITERATIONS);
        assert_eq!(LayoutConfig::default().relaxation_iterations(), DEPTH_ITERATIONS);
    }

    #[test]
    fn structure_link_height_is_capped_by_node_height() {
        let cfg = LayoutConfig {
            structure_node_height: 4.0,
            structure_link_height: 12.0,
            ..Default::default()
        };
        assert_eq!(cfg.structure_link_height(), 4.0);
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: LayoutConfig = serde_json::from_value(json!({ "nodePadding": 4.0 })).unwrap();
        assert_eq!(cfg.node_padding, 4.0);
        assert_eq!(cfg.column_step(), NODE_WIDTH + NODE_DISTANCE);
    }
}
