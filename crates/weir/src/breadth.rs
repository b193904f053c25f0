//! Horizontal layering.

use crate::config::LayoutConfig;
use crate::graphlib::NodeId;
use crate::model::Pin;
use crate::state::SankeyGraph;

/// Assigns every node a column and its pixel `x`. Returns the number of columns.
///
/// Cycle-causing links are never followed, so the walk terminates on any input.
pub fn run(g: &mut SankeyGraph, config: &LayoutConfig) -> usize {
    assign_forward_layers(g);
    pull_towards_consumers(g);
    let columns = stick_to_right(g);
    scale_node_breadths(g, config.column_step());
    tracing::debug!(columns, "sankey: computed node breadths");
    columns
}

/// Breadth-first from every node at once: a node's layer is the last round that reached it.
pub fn assign_forward_layers(g: &mut SankeyGraph) {
    let n = g.node_count();
    let mut current: Vec<NodeId> = g.node_ids().collect();
    let mut next: Vec<NodeId> = Vec::new();
    let mut next_seen = vec![false; n];
    let mut breadth = 0usize;

    while !current.is_empty() {
        if breadth > n {
            debug_assert!(false, "forward layering did not converge");
            tracing::warn!("sankey: forward layering did not converge");
            break;
        }
        for &v in &current {
            if let Some(node) = g.node_mut(v) {
                node.layer = breadth;
            }
            for &l in g.outgoing(v) {
                let Some(link) = g.link(l) else {
                    continue;
                };
                if link.causes_cycle {
                    continue;
                }
                let Some(t) = g.target(l) else {
                    continue;
                };
                if !next_seen[t.index()] {
                    next_seen[t.index()] = true;
                    next.push(t);
                }
            }
        }
        breadth += 1;
        current = std::mem::take(&mut next);
        next_seen.fill(false);
    }
}

/// Moves nodes right until they sit one column before their nearest consumer.
///
/// Right-pinned nodes are left alone here; [`stick_to_right`] places them.
pub fn pull_towards_consumers(g: &mut SankeyGraph) {
    let n = g.node_count();
    let mut current: Vec<NodeId> = g.node_ids().collect();
    let mut next: Vec<NodeId> = Vec::new();
    let mut next_seen = vec![false; n];
    let mut rounds = 0usize;

    while !current.is_empty() {
        if rounds > n {
            debug_assert!(false, "backward layering did not converge");
            tracing::warn!("sankey: backward layering did not converge");
            break;
        }
        for &v in &current {
            let pinned_right = g.node(v).is_some_and(|node| node.pin == Pin::Right);
            if !pinned_right {
                let nearest_consumer = g
                    .outgoing(v)
                    .iter()
                    .filter(|&&l| g.link(l).is_some_and(|link| !link.causes_cycle))
                    .filter_map(|&l| g.target(l))
                    .filter_map(|t| g.node(t).map(|node| node.layer))
                    .min();
                if let (Some(min_layer), Some(node)) = (nearest_consumer, g.node_mut(v)) {
                    node.layer = node.layer.max(min_layer.saturating_sub(1));
                }
            }

            for &l in g.incoming(v) {
                if g.link(l).is_none_or(|link| link.causes_cycle) {
                    continue;
                }
                let Some(s) = g.source(l) else {
                    continue;
                };
                if !next_seen[s.index()] {
                    next_seen[s.index()] = true;
                    next.push(s);
                }
            }
        }
        rounds += 1;
        current = std::mem::take(&mut next);
        next_seen.fill(false);
    }
}

/// Moves right-pinned nodes to the last column. Returns the column count.
pub fn stick_to_right(g: &mut SankeyGraph) -> usize {
    let Some(max_layer) = g.nodes().map(|(_, n)| n.layer).max() else {
        return 0;
    };
    for (_, node) in g.nodes_mut() {
        if node.pin == Pin::Right {
            node.layer = max_layer;
        }
    }
    max_layer + 1
}

pub fn scale_node_breadths(g: &mut SankeyGraph, kx: f64) {
    for (_, node) in g.nodes_mut() {
        node.x = node.layer as f64 * kx;
    }
}
