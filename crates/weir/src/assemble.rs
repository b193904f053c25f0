//! Projection of the working graph into flat, index-based output records.

use crate::config::LayoutConfig;
use crate::model::{Bounds, LinkLayout, NodeLayout, RenderMode, SankeyDiagramLayout};
use crate::state::SankeyGraph;

pub fn run(g: &SankeyGraph, mode: RenderMode, config: &LayoutConfig) -> SankeyDiagramLayout {
    let nodes: Vec<NodeLayout> = g
        .nodes()
        .map(|(v, n)| NodeLayout {
            input_index: n.input,
            label: n.label.clone(),
            color: n.color.clone(),
            value: n.value,
            unit: n.unit.clone(),
            show_unit: n.show_unit,
            show_total: n.show_total,
            pin: n.pin,
            fixed_row: n.fixed_row,
            layer: n.layer,
            x: n.x,
            y: n.y,
            dy: n.dy,
            incoming: g.incoming(v).iter().map(|l| l.index()).collect(),
            outgoing: g.outgoing(v).iter().map(|l| l.index()).collect(),
        })
        .collect();

    let links: Vec<LinkLayout> = g
        .links()
        .filter_map(|(l, link)| {
            let (source, target) = g.endpoints(l)?;
            Some(LinkLayout {
                input_index: link.input,
                source: source.index(),
                target: target.index(),
                value: link.value,
                color: link.color.clone(),
                unit: link.unit.clone(),
                causes_cycle: link.causes_cycle,
                cycle_index: link.cycle_index,
                dy: link.dy,
                sy: link.sy,
                ty: link.ty,
            })
        })
        .collect();

    SankeyDiagramLayout {
        mode,
        bounds: bounds(&nodes, config.node_width),
        node_width: config.node_width,
        nodes,
        links,
    }
}

fn bounds(nodes: &[NodeLayout], node_width: f64) -> Option<Bounds> {
    let first = nodes.first()?;
    let mut b = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x + node_width,
        max_y: first.y + first.dy,
    };
    for n in &nodes[1..] {
        b.min_x = b.min_x.min(n.x);
        b.min_y = b.min_y.min(n.y);
        b.max_x = b.max_x.max(n.x + node_width);
        b.max_y = b.max_y.max(n.y + n.dy);
    }
    Some(b)
}
