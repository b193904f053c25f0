//! Flow graph container used by `weir`.
//!
//! Nodes and links live in two arenas and refer to each other through integer handles
//! ([`NodeId`], [`LinkId`]) only, so a graph can be cloned, pruned and flattened without
//! chasing references.

#![forbid(unsafe_code)]

mod graph;

pub use graph::alg;
pub use graph::{FlowGraph, LinkId, NodeId};
