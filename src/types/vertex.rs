//! Vertex type for the analysis kernel.

use serde::{Deserialize, Serialize};
use super::gfid::Gfid;

/// Vertex stored in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    /// Whether the vertex is excluded as an intermediate or destination hop.
    pub blocked: bool,
    /// Outgoing edges in ingestion order.
    pub outgoing_edges: Vec<Gfid>,
}

impl Vertex {
    /// Create an unblocked vertex with no edges.
    pub fn new() -> Self {
        Self::default()
    }
}
