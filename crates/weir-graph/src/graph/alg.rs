//! Traversal helpers over a [`FlowGraph`].
//!
//! Every traversal takes a link filter so callers can walk a subgraph (for example only the
//! links accepted so far, or only forward links) without building a copy. All traversals use
//! explicit stacks; recursion depth never grows with path length.

use super::{FlowGraph, LinkId, NodeId};

/// Returns `true` if `to` is reachable from `from` following links accepted by `follow`.
///
/// `from == to` counts as reachable through the empty path.
pub fn has_path<N, L>(
    g: &FlowGraph<N, L>,
    from: NodeId,
    to: NodeId,
    mut follow: impl FnMut(LinkId, &L) -> bool,
) -> bool {
    if !g.contains_node(from) || !g.contains_node(to) {
        return false;
    }
    if from == to {
        return true;
    }

    let mut visited = vec![false; g.node_count()];
    let mut stack: Vec<NodeId> = vec![from];
    visited[from.index()] = true;

    while let Some(v) = stack.pop() {
        for &l in g.outgoing(v) {
            let Some(label) = g.link(l) else {
                continue;
            };
            if !follow(l, label) {
                continue;
            }
            let Some(w) = g.target(l) else {
                continue;
            };
            if w == to {
                return true;
            }
            if !visited[w.index()] {
                visited[w.index()] = true;
                stack.push(w);
            }
        }
    }
    false
}

/// Strongly connected components of the filtered subgraph (Tarjan), in completion order.
pub fn strongly_connected_components<N, L>(
    g: &FlowGraph<N, L>,
    mut follow: impl FnMut(LinkId, &L) -> bool,
) -> Vec<Vec<NodeId>> {
    const UNVISITED: usize = usize::MAX;

    let n = g.node_count();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<NodeId> = Vec::new();
    let mut sccs: Vec<Vec<NodeId>> = Vec::new();
    let mut next_index = 0usize;

    // Explicit call stack: (node, position in its outgoing list).
    let mut frames: Vec<(NodeId, usize)> = Vec::new();

    for root in g.node_ids() {
        if index[root.index()] != UNVISITED {
            continue;
        }
        frames.push((root, 0));
        index[root.index()] = next_index;
        lowlink[root.index()] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root.index()] = true;

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            let out = g.outgoing(v);
            if frame.1 < out.len() {
                let l = out[frame.1];
                frame.1 += 1;
                let Some(label) = g.link(l) else {
                    continue;
                };
                if !follow(l, label) {
                    continue;
                }
                let Some(w) = g.target(l) else {
                    continue;
                };
                if index[w.index()] == UNVISITED {
                    index[w.index()] = next_index;
                    lowlink[w.index()] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w.index()] = true;
                    frames.push((w, 0));
                } else if on_stack[w.index()] {
                    lowlink[v.index()] = lowlink[v.index()].min(index[w.index()]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent.index()] = lowlink[parent.index()].min(lowlink[v.index()]);
            }
            if lowlink[v.index()] == index[v.index()] {
                let mut scc: Vec<NodeId> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w.index()] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    sccs
}

/// Node sets that take part in a directed cycle of the filtered subgraph.
///
/// Components with more than one node are reported, as are single nodes with a followed
/// self-loop. Nodes inside each cycle are sorted by handle.
pub fn find_cycles<N, L>(
    g: &FlowGraph<N, L>,
    mut follow: impl FnMut(LinkId, &L) -> bool,
) -> Vec<Vec<NodeId>> {
    let sccs = strongly_connected_components(g, &mut follow);
    let mut cycles: Vec<Vec<NodeId>> = Vec::new();
    for mut scc in sccs {
        let is_cycle = if scc.len() > 1 {
            true
        } else {
            let v = scc[0];
            g.outgoing(v).iter().any(|&l| {
                g.target(l) == Some(v) && g.link(l).is_some_and(|label| follow(l, label))
            })
        };
        if is_cycle {
            scc.sort();
            cycles.push(scc);
        }
    }
    cycles
}

pub fn is_acyclic<N, L>(g: &FlowGraph<N, L>, follow: impl FnMut(LinkId, &L) -> bool) -> bool {
    find_cycles(g, follow).is_empty()
}
