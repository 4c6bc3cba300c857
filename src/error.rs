//! Error types for graph storage and traversal.

use thiserror::Error;

use crate::{EdgeId, NodeId};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors surfaced by graph construction and structural queries.
///
/// Every variant indicates misuse by the caller and fails the call
/// immediately; none of them is transient, so there is nothing to retry.
/// Data-quality problems (out-of-range coordinates) are collected by
/// [`crate::diagnostics::find_problems`] instead and never raised here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Structurally invalid argument, e.g. a loop edge passed to a
    /// common-node query, or an adjacent node matching neither endpoint
    /// of the edge being resolved.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Node id outside the allocated range.
    #[error("node {node} out of range ({nodes} nodes allocated)")]
    NodeOutOfRange { node: NodeId, nodes: u32 },

    /// Edge id outside the allocated range.
    #[error("edge {edge} out of range ({edges} edges allocated)")]
    EdgeOutOfRange { edge: EdgeId, edges: u32 },

    /// Mutation attempted after [`crate::RoutingGraph::freeze`].
    #[error("graph is frozen, construction is single-writer and ends at freeze")]
    Frozen,
}
