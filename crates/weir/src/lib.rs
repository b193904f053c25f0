//! Sankey diagram layout.
//!
//! Given weighted, directed flows between named nodes, `weir` computes a column for every
//! node, vertical positions and heights, and the stacking offsets of every link inside its
//! source and target nodes. Flow graphs may contain cycles; links that would close one are
//! classified and laid out as cycle lanes instead of being walked.
//!
//! The pipeline runs over one [`SankeyGraph`] arena:
//!
//! 1. linkage ([`state::build_graph`])
//! 2. valuation and pruning ([`value`])
//! 3. cycle marking ([`cycles`])
//! 4. breadth solving ([`breadth`])
//! 5. depth solving and link stacking ([`depth`], [`link_depth`])
//! 6. output assembly ([`assemble`])

#![forbid(unsafe_code)]

pub use weir_graph as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assemble;
pub mod breadth;
pub mod config;
pub mod cycles;
pub mod depth;
pub mod json;
pub mod layout;
pub mod link_depth;
pub mod model;
pub mod state;
pub mod value;

mod error;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use json::{layout_json, parse_input};
pub use layout::{SankeyLayout, layout};
pub use model::{
    Bounds, LinkLayout, NodeLayout, Pin, RenderMode, SankeyDiagramLayout, SankeyInput,
    SankeyLink, SankeyNode,
};
pub use state::{LinkState, NodeState, SankeyGraph};
