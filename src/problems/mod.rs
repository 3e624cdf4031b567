//! Sample graphs.
//!
//! A 2D maze where the nodes are free cells, and a small explicit weighted
//! digraph. Both implement `PathNodeGraph` the way a caller would.

pub mod grid;
pub mod weighted_digraph;
