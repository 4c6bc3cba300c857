//! Array-backed storage and traversal core for road-network routing graphs.
//!
//! A road network is a directed multigraph of junctions ([`NodeId`]) and
//! segments ([`EdgeId`]) held in flat parallel arrays: per-node coordinates,
//! per-edge records with linked adjacency chains, and the planar projection
//! math used to snap arbitrary query coordinates onto the nearest edge.
//! Search, contraction and spatial-index layers consume this storage through
//! [`RoutingGraph`] and per-thread [`EdgeExplorer`] cursors; the import layer
//! is the single writer and freezes the graph before handing it out.

pub mod coords;
pub mod diagnostics;
pub mod distance;
pub mod edges;
pub mod error;
pub mod graph;

/// Node identifier: an index into the coordinate arrays.
pub type NodeId = u32;

/// Edge identifier: an index into the edge record array.
pub type EdgeId = u32;

pub use coords::CoordStore;
pub use diagnostics::find_problems;
pub use distance::Point;
pub use edges::{direction_from_key, edge_from_key, edge_key, EdgeExplorer, EdgeView, NO_EDGE};
pub use error::{GraphError, Result};
pub use graph::{adj_node, RoutingGraph};
