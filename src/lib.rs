//! A* path search over lazily evaluated graphs.
//!
//! Implement [`graph::PathNodeGraph`] for your graph, bind it to an
//! [`astar::AStar`] and ask for paths. Nodes, edges and heuristic estimates
//! are only computed when the search needs them.

use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod derank;
pub mod open_list;

// Costs
// -----
pub mod cost;
pub mod float_cost;

// Graph and search state
// ----------------------
pub mod graph;
pub mod node_cache;
pub mod path;
pub mod path_node;

// Algorithms
// ----------
pub mod astar;

// Problems
// --------
pub mod problems;

pub use astar::AStar;
pub use astar::SearchStats;
pub use cost::Cost;
pub use graph::IntrinsicIdentity;
pub use graph::NodeIdentity;
pub use graph::PathNodeGraph;
pub use path::ReversedPath;
