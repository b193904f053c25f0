use weir_graph::{FlowGraph, NodeId, alg};

fn graph(n: usize, links: &[(usize, usize)]) -> FlowGraph<(), bool> {
    let mut g: FlowGraph<(), bool> = FlowGraph::new();
    let ids: Vec<NodeId> = (0..n).map(|_| g.add_node(())).collect();
    for &(s, t) in links {
        g.add_link(ids[s], ids[t], true);
    }
    g.compute_linkage();
    g
}

#[test]
fn has_path_follows_links_transitively() {
    let g = graph(4, &[(0, 1), (1, 2), (2, 3)]);
    assert!(alg::has_path(&g, NodeId::new(0), NodeId::new(3), |_, _| true));
    assert!(!alg::has_path(&g, NodeId::new(3), NodeId::new(0), |_, _| true));
}

#[test]
fn has_path_treats_a_node_as_reaching_itself() {
    let g = graph(1, &[]);
    assert!(alg::has_path(&g, NodeId::new(0), NodeId::new(0), |_, _| true));
}

#[test]
fn has_path_respects_the_link_filter() {
    let g = graph(3, &[(0, 1), (1, 2)]);
    assert!(!alg::has_path(&g, NodeId::new(0), NodeId::new(2), |l, _| {
        l.index() != 1
    }));
}

#[test]
fn has_path_handles_long_chains_without_recursion() {
    let n = 200_000;
    let links: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
    let g = graph(n, &links);
    assert!(alg::has_path(&g, NodeId::new(0), NodeId::new(n - 1), |_, _| true));
}

#[test]
fn has_path_rejects_unknown_nodes() {
    let g = graph(2, &[(0, 1)]);
    assert!(!alg::has_path(&g, NodeId::new(0), NodeId::new(5), |_, _| true));
}

#[test]
fn find_cycles_reports_nothing_for_a_dag() {
    let g = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    assert!(alg::find_cycles(&g, |_, _| true).is_empty());
    assert!(alg::is_acyclic(&g, |_, _| true));
}

#[test]
fn find_cycles_reports_each_cycle_once() {
    let g = graph(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (2, 5)]);
    let mut cycles = alg::find_cycles(&g, |_, _| true);
    cycles.sort();
    assert_eq!(
        cycles,
        vec![
            vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)],
            vec![NodeId::new(3), NodeId::new(4)],
        ]
    );
}

#[test]
fn find_cycles_reports_self_loops() {
    let g = graph(2, &[(0, 1), (1, 1)]);
    assert_eq!(alg::find_cycles(&g, |_, _| true), vec![vec![NodeId::new(1)]]);
}

#[test]
fn find_cycles_ignores_filtered_links() {
    let mut g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
    if let Some(label) = g.link_mut(weir_graph::LinkId::new(2)) {
        *label = false;
    }
    assert!(alg::is_acyclic(&g, |_, followed| *followed));
    assert!(!alg::is_acyclic(&g, |_, _| true));
}

#[test]
fn strongly_connected_components_cover_every_node() {
    let g = graph(5, &[(0, 1), (1, 0), (1, 2), (3, 4)]);
    let sccs = alg::strongly_connected_components(&g, |_, _| true);
    let total: usize = sccs.iter().map(Vec::len).sum();
    assert_eq!(total, 5);
    assert_eq!(sccs.iter().filter(|c| c.len() == 2).count(), 1);
}
