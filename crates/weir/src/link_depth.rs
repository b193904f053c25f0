//! Link stacking inside nodes.
//!
//! Each node's incoming and outgoing links are sorted, then stacked top to bottom. Cycle links
//! go to the outside of the stack: on top for nodes in the upper half of the diagram, at the
//! bottom for nodes in the lower half, outermost first by cycle index. Forward links follow
//! the vertical order of the node at their other end.

use crate::graphlib::{LinkId, NodeId};
use crate::model::RenderMode;
use crate::state::SankeyGraph;
use std::cmp::Ordering;

pub fn run(g: &mut SankeyGraph, mode: RenderMode) {
    sort_links(g);
    match mode {
        RenderMode::Proportional => stack_links(g),
        RenderMode::Structure => center_links(g),
    }
}

/// Vertical middle of the diagram's node extent.
pub fn diagram_middle(g: &SankeyGraph) -> f64 {
    let (top, bottom) = g
        .nodes()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(top, bottom), (_, n)| {
            (top.min(n.y), bottom.max(n.y + n.dy))
        });
    if top.is_finite() && bottom.is_finite() {
        (top + bottom) / 2.0
    } else {
        0.0
    }
}

fn cycle_rank(g: &SankeyGraph, l: LinkId) -> Option<usize> {
    g.link(l)
        .filter(|link| link.causes_cycle)
        .map(|link| link.cycle_index.unwrap_or(0))
}

fn neighbour_y(g: &SankeyGraph, neighbour: Option<NodeId>) -> f64 {
    neighbour.and_then(|v| g.node(v)).map_or(0.0, |n| n.y)
}

fn compare_links(
    g: &SankeyGraph,
    a: LinkId,
    b: LinkId,
    cycles_on_top: bool,
    neighbour: impl Fn(&SankeyGraph, LinkId) -> Option<NodeId>,
) -> Ordering {
    let ordering = match (cycle_rank(g, a), cycle_rank(g, b)) {
        (Some(ia), Some(ib)) => {
            if cycles_on_top {
                ia.cmp(&ib)
            } else {
                ib.cmp(&ia)
            }
        }
        (Some(_), None) => {
            if cycles_on_top {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (None, Some(_)) => {
            if cycles_on_top {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (None, None) => {
            let ya = neighbour_y(g, neighbour(g, a));
            let yb = neighbour_y(g, neighbour(g, b));
            ya.total_cmp(&yb)
        }
    };
    ordering.then_with(|| a.cmp(&b))
}

pub fn sort_links(g: &mut SankeyGraph) {
    let middle = diagram_middle(g);
    for v in g.node_ids() {
        let cycles_on_top = g.node(v).is_some_and(|n| n.center() <= middle);
        g.sort_incoming_by(v, |g, a, b| {
            compare_links(g, a, b, cycles_on_top, |g, l| g.source(l))
        });
        g.sort_outgoing_by(v, |g, a, b| {
            compare_links(g, a, b, cycles_on_top, |g, l| g.target(l))
        });
    }
}

/// Proportional mode: links are stacked by height in their sorted order.
pub fn stack_links(g: &mut SankeyGraph) {
    for v in g.node_ids() {
        let outgoing = g.outgoing(v).to_vec();
        let mut sy = 0.0;
        for l in outgoing {
            if let Some(link) = g.link_mut(l) {
                link.sy = sy;
                sy += link.dy;
            }
        }

        let incoming = g.incoming(v).to_vec();
        let mut ty = 0.0;
        for l in incoming {
            if let Some(link) = g.link_mut(l) {
                link.ty = ty;
                ty += link.dy;
            }
        }
    }
}

/// Structure mode: every link is centered on both of its nodes.
pub fn center_links(g: &mut SankeyGraph) {
    for l in g.link_ids() {
        let Some((source, target)) = g.endpoints(l) else {
            continue;
        };
        let source_dy = g.node(source).map_or(0.0, |n| n.dy);
        let target_dy = g.node(target).map_or(0.0, |n| n.dy);
        if let Some(link) = g.link_mut(l) {
            link.sy = (source_dy - link.dy) / 2.0;
            link.ty = (target_dy - link.dy) / 2.0;
        }
    }
}
