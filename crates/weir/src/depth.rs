//! Vertical positioning.
//!
//! Nodes get their heights from one global scale, are stacked per column (fixed-row nodes in
//! their own bands on top), and are then relaxed towards the weighted centers of their
//! neighbours with a cooling factor, resolving overlaps after every half pass.

use crate::config::LayoutConfig;
use crate::graphlib::{LinkId, NodeId};
use crate::link_depth;
use crate::model::RenderMode;
use crate::state::SankeyGraph;
use std::cmp::Ordering;

pub fn run(g: &mut SankeyGraph, mode: RenderMode, config: &LayoutConfig) {
    let mut columns = nodes_grouped_by_breadth(g);
    let ky = scale_factor(g, mode, config);
    tracing::debug!(ky, columns = columns.len(), "sankey: initializing node depths");

    let free_top = initialize_node_depths(g, &columns, ky, mode, config);
    resolve_collisions(g, &mut columns, free_top, config.node_padding);

    let mut alpha = 1.0;
    for i in 0..config.relaxation_iterations() {
        relax_left_to_right(g, &columns, alpha, mode, config.value_epsilon);
        resolve_collisions(g, &mut columns, free_top, config.node_padding);
        relax_right_to_left(g, &columns, alpha, mode, config.value_epsilon);
        resolve_collisions(g, &mut columns, free_top, config.node_padding);
        tracing::trace!(iteration = i, alpha, "sankey: relaxation pass");
        alpha *= config.cooling;
    }

    bring_back_to_top(g);
    link_depth::run(g, mode);
}

/// Node handles per column, columns left to right, nodes in arena order.
pub fn nodes_grouped_by_breadth(g: &SankeyGraph) -> Vec<Vec<NodeId>> {
    let Some(max_layer) = g.nodes().map(|(_, n)| n.layer).max() else {
        return Vec::new();
    };
    let mut columns: Vec<Vec<NodeId>> = vec![Vec::new(); max_layer + 1];
    for (v, n) in g.nodes() {
        columns[n.layer].push(v);
    }
    columns.retain(|c| !c.is_empty());
    columns
}

/// Pixels per unit of value: the largest node gets the mode's maximum height.
///
/// Nodes at or below `value_epsilon` do not take part; if none is left the scale is 0. In
/// proportional mode node sizes are measured relative to the largest link, so flows whose
/// sums overflow `f64` still get a finite scale.
pub fn scale_factor(g: &SankeyGraph, mode: RenderMode, config: &LayoutConfig) -> f64 {
    let max_height = config.max_node_height(mode);
    let significant = g
        .nodes()
        .filter(|(_, n)| n.value > config.value_epsilon)
        .map(|(v, n)| (v, n.value));

    match mode {
        RenderMode::Structure => {
            let max_value = significant.map(|(_, value)| value).fold(f64::NAN, f64::max);
            if max_value.is_nan() {
                return 0.0;
            }
            max_height / max_value
        }
        RenderMode::Proportional => {
            let unit = g.links().map(|(_, l)| l.value).fold(0.0, f64::max);
            if unit <= 0.0 {
                return 0.0;
            }
            let max_relative = significant
                .map(|(v, _)| relative_node_value(g, v, unit))
                .fold(f64::NAN, f64::max);
            if max_relative.is_nan() || max_relative <= 0.0 {
                return 0.0;
            }
            max_height / max_relative / unit
        }
    }
}

/// Larger of a node's inflow and outflow, in multiples of `unit`.
fn relative_node_value(g: &SankeyGraph, v: NodeId, unit: f64) -> f64 {
    let side = |links: &[LinkId]| -> f64 {
        links
            .iter()
            .filter_map(|&l| g.link(l))
            .map(|link| link.value / unit)
            .sum()
    };
    side(g.incoming(v)).max(side(g.outgoing(v)))
}

/// Sets heights and the starting stack. Returns the top of the free-node area.
///
/// Fixed-row nodes each get a band of their own, ordered by column, separated by
/// `fixed_row_padding`. Free nodes are stacked per column below the last band.
pub fn initialize_node_depths(
    g: &mut SankeyGraph,
    columns: &[Vec<NodeId>],
    ky: f64,
    mode: RenderMode,
    config: &LayoutConfig,
) -> f64 {
    let structure_link_height = config.structure_link_height();
    for (_, link) in g.links_mut() {
        link.dy = match mode {
            RenderMode::Proportional => link.value * ky,
            RenderMode::Structure => structure_link_height,
        };
    }
    for v in g.node_ids() {
        let dy = match mode {
            // Summed link heights instead of `value * ky`: the value may have saturated.
            RenderMode::Proportional => {
                let side = |links: &[LinkId]| -> f64 {
                    links.iter().filter_map(|&l| g.link(l)).map(|l| l.dy).sum()
                };
                side(g.incoming(v)).max(side(g.outgoing(v)))
            }
            RenderMode::Structure => g.node(v).map_or(0.0, |n| n.value * ky),
        };
        if let Some(node) = g.node_mut(v) {
            node.dy = dy;
        }
    }

    let mut free_top = 0.0;
    for column in columns {
        for &v in column {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            if node.fixed_row {
                node.y = free_top;
                free_top += node.dy + config.fixed_row_padding;
            }
        }
    }

    for column in columns {
        let mut y = free_top;
        for &v in column {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            if node.fixed_row {
                continue;
            }
            node.y = y;
            y += node.dy + config.node_padding;
        }
    }

    free_top
}

fn by_y(g: &SankeyGraph, a: NodeId, b: NodeId) -> Ordering {
    let ya = g.node(a).map_or(0.0, |n| n.y);
    let yb = g.node(b).map_or(0.0, |n| n.y);
    ya.total_cmp(&yb).then_with(|| a.cmp(&b))
}

/// Pushes free nodes down until each column keeps `padding` between neighbours.
///
/// Fixed-row nodes never move; free nodes start no higher than `free_top`, which lies below
/// every fixed band, so a collision with a band always moves the free node.
pub fn resolve_collisions(
    g: &mut SankeyGraph,
    columns: &mut [Vec<NodeId>],
    free_top: f64,
    padding: f64,
) {
    for column in columns.iter_mut() {
        column.sort_by(|&a, &b| by_y(g, a, b));
        let mut y0 = free_top;
        for &v in column.iter() {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            if node.fixed_row {
                continue;
            }
            let dy = y0 - node.y;
            if dy > 0.0 {
                node.y += dy;
            }
            y0 = node.y + node.dy + padding;
        }
    }
}

fn relaxation_weight(g: &SankeyGraph, l: LinkId, mode: RenderMode, epsilon: f64) -> f64 {
    match mode {
        RenderMode::Structure => 1.0,
        RenderMode::Proportional => g.link(l).map_or(epsilon, |link| link.value.max(epsilon)),
    }
}

/// Weighted mean center of the free neighbours reached through forward links, if any.
///
/// Weights are divided by the largest one so that sums stay finite for huge flows.
fn neighbour_center(
    g: &SankeyGraph,
    links: &[LinkId],
    neighbour: impl Fn(LinkId) -> Option<NodeId>,
    mode: RenderMode,
    epsilon: f64,
) -> Option<f64> {
    let weighted: Vec<(f64, f64)> = links
        .iter()
        .filter(|&&l| g.link(l).is_some_and(|link| !link.causes_cycle))
        .filter_map(|&l| {
            let other = neighbour(l).and_then(|v| g.node(v))?;
            if other.fixed_row {
                return None;
            }
            Some((other.center(), relaxation_weight(g, l, mode, epsilon)))
        })
        .collect();

    let max_weight = weighted.iter().map(|&(_, w)| w).fold(0.0, f64::max);
    if max_weight <= 0.0 {
        return None;
    }
    let mut y = 0.0;
    let mut w = 0.0;
    for (center, weight) in weighted {
        let weight = weight / max_weight;
        y += center * weight;
        w += weight;
    }
    Some(y / w)
}

fn relax_node(g: &mut SankeyGraph, v: NodeId, target_center: f64, alpha: f64) {
    if let Some(node) = g.node_mut(v) {
        node.y += (target_center - node.center()) * alpha;
    }
}

/// Moves free nodes towards the centers of their upstream neighbours, column by column.
pub fn relax_left_to_right(
    g: &mut SankeyGraph,
    columns: &[Vec<NodeId>],
    alpha: f64,
    mode: RenderMode,
    epsilon: f64,
) {
    for column in columns {
        for &v in column {
            if g.node(v).is_none_or(|n| n.fixed_row) {
                continue;
            }
            let center = neighbour_center(g, g.incoming(v), |l| g.source(l), mode, epsilon);
            if let Some(center) = center {
                relax_node(g, v, center, alpha);
            }
        }
    }
}

/// Moves free nodes towards the centers of their downstream neighbours, right to left.
pub fn relax_right_to_left(
    g: &mut SankeyGraph,
    columns: &[Vec<NodeId>],
    alpha: f64,
    mode: RenderMode,
    epsilon: f64,
) {
    for column in columns.iter().rev() {
        for &v in column {
            if g.node(v).is_none_or(|n| n.fixed_row) {
                continue;
            }
            let center = neighbour_center(g, g.outgoing(v), |l| g.target(l), mode, epsilon);
            if let Some(center) = center {
                relax_node(g, v, center, alpha);
            }
        }
    }
}

/// Shifts the whole diagram up so the topmost node touches `y = 0`.
pub fn bring_back_to_top(g: &mut SankeyGraph) {
    let min_y = g.nodes().map(|(_, n)| n.y).fold(f64::INFINITY, f64::min);
    if !min_y.is_finite() || min_y == 0.0 {
        return;
    }
    for (_, node) in g.nodes_mut() {
        node.y -= min_y;
    }
}
