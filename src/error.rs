//! Error types for graph construction, blocking and analysis.

use crate::types::Gfid;

/// Structural error raised by the graph store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Vertex is not part of the graph.
    #[error("Vertex not found: {0}")]
    VertexNotFound(Gfid),
    /// Edge id is already present.
    #[error("Duplicate edge: {0}")]
    DuplicateEdge(Gfid),
    /// Vertex is already blocked.
    #[error("Vertex already blocked: {0}")]
    AlreadyBlocked(Gfid),
    /// Vertex is not blocked.
    #[error("Vertex not blocked: {0}")]
    NotBlocked(Gfid),
    /// Traversal cost is negative or not a number.
    #[error("Invalid cost {cost} on edge {edge}")]
    InvalidCost {
        /// Offending edge.
        edge: Gfid,
        /// Rejected cost.
        cost: f64,
    },
}

/// Error type for analyser operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A traversal was requested before the graph was built.
    #[error("Graph not prepared")]
    GraphNotPrepared,
    /// Requested path count is zero or above the configured maximum.
    #[error("Invalid k: {k} (expected 1..={max})")]
    InvalidK {
        /// Requested path count.
        k: usize,
        /// Configured upper bound.
        max: usize,
    },
    /// Structural graph error.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The blocked-vertex store rejected a mirror operation.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl AnalysisError {
    /// Create a persistence error from any store error type.
    pub fn from_store<E: std::error::Error>(e: E) -> Self {
        Self::Persistence(e.to_string())
    }
}
