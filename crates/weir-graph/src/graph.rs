//! Arena-backed directed multigraph.
//!
//! Parallel links and self-loops are allowed. Every node keeps its incoming and outgoing link
//! handles in link insertion order until a caller reorders them with
//! [`FlowGraph::sort_incoming_by`] / [`FlowGraph::sort_outgoing_by`].

pub mod alg;
mod handle;

pub use handle::{LinkId, NodeId};

use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    label: N,
    incoming: Vec<LinkId>,
    outgoing: Vec<LinkId>,
}

#[derive(Debug, Clone)]
struct LinkEntry<L> {
    source: NodeId,
    target: NodeId,
    label: L,
}

#[derive(Debug, Clone)]
pub struct FlowGraph<N, L> {
    nodes: Vec<NodeEntry<N>>,
    links: Vec<LinkEntry<L>>,
}

impl<N, L> Default for FlowGraph<N, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, L> FlowGraph<N, L> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            links: Vec::with_capacity(links),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_node(&mut self, label: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeEntry {
            label,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        });
        id
    }

    /// Adds a link between two existing nodes.
    ///
    /// Returns `None` (and adds nothing) when either endpoint is not a node of this graph.
    /// Adjacency is not touched; call [`FlowGraph::compute_linkage`] once all links are in.
    pub fn add_link(&mut self, source: NodeId, target: NodeId, label: L) -> Option<LinkId> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        let id = LinkId::new(self.links.len());
        self.links.push(LinkEntry {
            source,
            target,
            label,
        });
        Some(id)
    }

    /// Rebuilds every node's incoming/outgoing link lists from the link endpoints.
    ///
    /// A link is outgoing for a node iff the node is its source, and incoming iff the node is
    /// its target. Lists come out in link order.
    pub fn compute_linkage(&mut self) {
        for n in &mut self.nodes {
            n.incoming.clear();
            n.outgoing.clear();
        }
        for (i, l) in self.links.iter().enumerate() {
            let id = LinkId::new(i);
            self.nodes[l.source.index()].outgoing.push(id);
            self.nodes[l.target.index()].incoming.push(id);
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn contains_link(&self, id: LinkId) -> bool {
        id.index() < self.links.len()
    }

    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + use<N, L> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    pub fn link_ids(&self) -> impl ExactSizeIterator<Item = LinkId> + use<N, L> {
        (0..self.links.len()).map(LinkId::new)
    }

    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.index()).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id.index()).map(|n| &mut n.label)
    }

    pub fn link(&self, id: LinkId) -> Option<&L> {
        self.links.get(id.index()).map(|l| &l.label)
    }

    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut L> {
        self.links.get_mut(id.index()).map(|l| &mut l.label)
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &N)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i), &n.label))
    }

    pub fn nodes_mut(&mut self) -> impl ExactSizeIterator<Item = (NodeId, &mut N)> {
        self.nodes
            .iter_mut()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i), &mut n.label))
    }

    pub fn links(&self) -> impl ExactSizeIterator<Item = (LinkId, &L)> {
        self.links
            .iter()
            .enumerate()
            .map(|(i, l)| (LinkId::new(i), &l.label))
    }

    pub fn links_mut(&mut self) -> impl ExactSizeIterator<Item = (LinkId, &mut L)> {
        self.links
            .iter_mut()
            .enumerate()
            .map(|(i, l)| (LinkId::new(i), &mut l.label))
    }

    pub fn source(&self, id: LinkId) -> Option<NodeId> {
        self.links.get(id.index()).map(|l| l.source)
    }

    pub fn target(&self, id: LinkId) -> Option<NodeId> {
        self.links.get(id.index()).map(|l| l.target)
    }

    /// `(source, target)` of a link.
    pub fn endpoints(&self, id: LinkId) -> Option<(NodeId, NodeId)> {
        self.links.get(id.index()).map(|l| (l.source, l.target))
    }

    pub fn incoming(&self, id: NodeId) -> &[LinkId] {
        self.nodes
            .get(id.index())
            .map(|n| n.incoming.as_slice())
            .unwrap_or(&[])
    }

    pub fn outgoing(&self, id: NodeId) -> &[LinkId] {
        self.nodes
            .get(id.index())
            .map(|n| n.outgoing.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes with neither incoming nor outgoing links.
    pub fn is_isolated(&self, id: NodeId) -> bool {
        self.incoming(id).is_empty() && self.outgoing(id).is_empty()
    }

    /// Stable-sorts a node's incoming links. The comparator sees the whole graph.
    pub fn sort_incoming_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(&Self, LinkId, LinkId) -> Ordering,
    {
        let Some(entry) = self.nodes.get_mut(id.index()) else {
            return;
        };
        let mut incoming = std::mem::take(&mut entry.incoming);
        let this: &Self = self;
        incoming.sort_by(|&a, &b| compare(this, a, b));
        self.nodes[id.index()].incoming = incoming;
    }

    /// Stable-sorts a node's outgoing links. The comparator sees the whole graph.
    pub fn sort_outgoing_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(&Self, LinkId, LinkId) -> Ordering,
    {
        let Some(entry) = self.nodes.get_mut(id.index()) else {
            return;
        };
        let mut outgoing = std::mem::take(&mut entry.outgoing);
        let this: &Self = self;
        outgoing.sort_by(|&a, &b| compare(this, a, b));
        self.nodes[id.index()].outgoing = outgoing;
    }

    /// Keeps the nodes for which `keep` returns `true`, dropping every link that touches a
    /// removed node.
    ///
    /// Surviving nodes and links keep their relative order and are renumbered densely.
    /// Adjacency is rebuilt. The returned table maps each old node handle to its new handle.
    pub fn retain_nodes<F>(&mut self, mut keep: F) -> Vec<Option<NodeId>>
    where
        F: FnMut(NodeId, &N) -> bool,
    {
        let keep_mask: Vec<bool> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| keep(NodeId::new(i), &n.label))
            .collect();

        let mut remap: Vec<Option<NodeId>> = Vec::with_capacity(self.nodes.len());
        let mut next = 0usize;
        for &k in &keep_mask {
            if k {
                remap.push(Some(NodeId::new(next)));
                next += 1;
            } else {
                remap.push(None);
            }
        }

        if next == self.nodes.len() {
            return remap;
        }

        let mut i = 0usize;
        self.nodes.retain(|_| {
            let k = keep_mask[i];
            i += 1;
            k
        });

        let links = std::mem::take(&mut self.links);
        self.links = links
            .into_iter()
            .filter_map(|l| {
                let source = remap[l.source.index()]?;
                let target = remap[l.target.index()]?;
                Some(LinkEntry {
                    source,
                    target,
                    label: l.label,
                })
            })
            .collect();

        self.compute_linkage();
        remap
    }
}
