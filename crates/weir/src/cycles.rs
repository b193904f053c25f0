//! Cycle classification.
//!
//! Links are accepted greedily in input order. A link whose target already reaches its
//! source through accepted links would close a cycle: it is marked `causes_cycle`, gets the
//! next cycle index and stays out of the accepted set. Accepted links always form a DAG, which
//! is what the breadth and depth solvers walk.

use crate::graphlib::alg;
use crate::state::SankeyGraph;

/// Marks cycle-causing links and returns how many there are.
///
/// Worst case is O(L²) in the link count.
pub fn run(g: &mut SankeyGraph) -> usize {
    let mut accepted = vec![false; g.link_count()];
    let mut next_cycle_index = 0usize;

    for l in g.link_ids() {
        let Some((source, target)) = g.endpoints(l) else {
            continue;
        };
        // Self-loops are reported as closing a cycle by `has_path`.
        let closes_cycle = alg::has_path(g, target, source, |id, _| accepted[id.index()]);

        let Some(link) = g.link_mut(l) else {
            continue;
        };
        if closes_cycle {
            next_cycle_index += 1;
            link.causes_cycle = true;
            link.cycle_index = Some(next_cycle_index);
        } else {
            link.causes_cycle = false;
            link.cycle_index = None;
            accepted[l.index()] = true;
        }
    }

    if next_cycle_index > 0 {
        tracing::debug!(cycles = next_cycle_index, "sankey: marked cycle-causing links");
    }
    next_cycle_index
}
