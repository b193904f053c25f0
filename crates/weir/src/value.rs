//! Node valuation and pruning.

use crate::model::RenderMode;
use crate::state::SankeyGraph;

/// Sets every node's value and drops nodes without any link.
///
/// A node's value is the larger of its inflow and outflow sums, so its rectangle can hold both
/// ribbon stacks even when solver output is slightly unbalanced. Sums saturate at
/// `f64::MAX`. In structure mode every value is 1. Returns the number of pruned nodes.
pub fn run(g: &mut SankeyGraph, mode: RenderMode) -> usize {
    compute_node_values(g, mode);
    prune_isolated_nodes(g)
}

pub fn compute_node_values(g: &mut SankeyGraph, mode: RenderMode) {
    for v in g.node_ids() {
        let value = match mode {
            RenderMode::Structure => 1.0,
            RenderMode::Proportional => {
                let link_value = |l| g.link(l).map_or(0.0, |s| s.value);
                let inflow: f64 = g.incoming(v).iter().copied().map(link_value).sum();
                let outflow: f64 = g.outgoing(v).iter().copied().map(link_value).sum();
                // Finite links can still overflow when summed.
                inflow.max(outflow).min(f64::MAX)
            }
        };
        if let Some(n) = g.node_mut(v) {
            n.value = value;
        }
    }
}

pub fn prune_isolated_nodes(g: &mut SankeyGraph) -> usize {
    let isolated: Vec<bool> = g.node_ids().map(|v| g.is_isolated(v)).collect();
    let before = g.node_count();
    g.retain_nodes(|v, _| !isolated[v.index()]);
    let pruned = before - g.node_count();
    if pruned > 0 {
        tracing::debug!(pruned, "sankey: dropped unconnected nodes");
    }
    pruned
}
