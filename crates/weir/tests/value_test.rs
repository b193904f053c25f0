use weir::graphlib::NodeId;
use weir::{RenderMode, SankeyInput, SankeyLink, SankeyNode, state, value};

fn input(labels: &[&str], links: &[(usize, usize, f64)]) -> SankeyInput {
    SankeyInput {
        nodes: labels.iter().map(|l| SankeyNode::new(*l)).collect(),
        links: links
            .iter()
            .map(|&(s, t, v)| SankeyLink::new(s, t, v))
            .collect(),
    }
}

fn values(g: &weir::SankeyGraph) -> Vec<(String, f64)> {
    g.nodes().map(|(_, n)| (n.label.clone(), n.value)).collect()
}

#[test]
fn node_value_is_the_larger_of_inflow_and_outflow() {
    let mut g = state::build_graph(&input(
        &["coal", "plant", "grid", "loss"],
        &[(0, 1, 10.0), (1, 2, 6.0), (1, 3, 3.5)],
    ));
    value::compute_node_values(&mut g, RenderMode::Proportional);
    assert_eq!(
        values(&g),
        vec![
            ("coal".to_string(), 10.0),
            ("plant".to_string(), 10.0),
            ("grid".to_string(), 6.0),
            ("loss".to_string(), 3.5),
        ]
    );
}

#[test]
fn outflow_wins_when_it_exceeds_inflow() {
    let mut g = state::build_graph(&input(&["a", "b", "c"], &[(0, 1, 2.0), (1, 2, 5.0)]));
    value::compute_node_values(&mut g, RenderMode::Proportional);
    assert_eq!(g.node(NodeId::new(1)).unwrap().value, 5.0);
}

#[test]
fn structure_mode_values_every_node_at_one() {
    let mut g = state::build_graph(&input(&["a", "b"], &[(0, 1, 1e9)]));
    value::compute_node_values(&mut g, RenderMode::Structure);
    assert!(g.nodes().all(|(_, n)| n.value == 1.0));
}

#[test]
fn unconnected_nodes_are_pruned() {
    let mut g = state::build_graph(&input(
        &["lonely", "a", "also lonely", "b"],
        &[(1, 3, 4.0)],
    ));
    let pruned = value::run(&mut g, RenderMode::Proportional);
    assert_eq!(pruned, 2);
    assert_eq!(
        g.nodes().map(|(_, n)| n.label.as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert_eq!(g.node(NodeId::new(0)).unwrap().input, 1);
    assert_eq!(g.node(NodeId::new(1)).unwrap().input, 3);
    let l = g.outgoing(NodeId::new(0))[0];
    assert_eq!(g.endpoints(l), Some((NodeId::new(0), NodeId::new(1))));
}

#[test]
fn zero_valued_links_still_connect_nodes() {
    let mut g = state::build_graph(&input(&["a", "b"], &[(0, 1, 0.0)]));
    assert_eq!(value::run(&mut g, RenderMode::Proportional), 0);
    assert_eq!(g.node_count(), 2);
    assert!(g.nodes().all(|(_, n)| n.value == 0.0));
}

#[test]
fn invalid_link_values_are_clamped_and_bad_endpoints_dropped() {
    let g = state::build_graph(&input(
        &["a", "b"],
        &[(0, 1, -3.0), (0, 1, f64::NAN), (0, 7, 1.0), (0, 1, 2.0)],
    ));
    assert_eq!(g.link_count(), 3);
    let values: Vec<f64> = g.links().map(|(_, l)| l.value).collect();
    assert_eq!(values, vec![0.0, 0.0, 2.0]);
    let inputs: Vec<usize> = g.links().map(|(_, l)| l.input).collect();
    assert_eq!(inputs, vec![0, 1, 3]);
}

#[test]
fn overflowing_sums_saturate_at_the_largest_finite_value() {
    let mut g = state::build_graph(&input(&["a", "b", "c"], &[(0, 1, 1e308), (0, 2, 1e308)]));
    value::run(&mut g, RenderMode::Proportional);
    assert_eq!(
        values(&g),
        vec![
            ("a".to_string(), f64::MAX),
            ("b".to_string(), 1e308),
            ("c".to_string(), 1e308),
        ]
    );
}
