//! In-memory graph store.
//!
//! Vertices and edges are keyed by their global feature identifier rather
//! than linked by reference, so edges and their endpoints never own each
//! other. Both maps are `BTreeMap` for deterministic iteration order.

pub mod blocking;
pub mod builder;
pub mod snapshot;

use std::collections::BTreeMap;

use crate::error::GraphError;
use crate::types::{Gfid, GraphEdge, Path, Vertex};

pub use builder::{BuildReport, GraphBuilder, RecordFailure};
pub use snapshot::GraphSnapshot;

/// Adjacency store for one analysis session.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: BTreeMap<Gfid, Vertex>,
    edges: BTreeMap<Gfid, GraphEdge>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unblocked vertex. Returns `false` if it already existed.
    pub fn add_vertex(&mut self, id: Gfid) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, Vertex::new());
        true
    }

    /// Add an edge between two existing vertices.
    ///
    /// The edge becomes outgoing from `source`, and from `target` as well
    /// when it is bidirectional. A bidirectional self-loop is listed once.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<(), GraphError> {
        if self.edges.contains_key(&edge.id) {
            return Err(GraphError::DuplicateEdge(edge.id));
        }
        if edge.direct_cost.is_nan() || edge.direct_cost < 0.0 {
            return Err(GraphError::InvalidCost {
                edge: edge.id,
                cost: edge.direct_cost,
            });
        }
        if !self.vertices.contains_key(&edge.source) {
            return Err(GraphError::VertexNotFound(edge.source));
        }
        if !self.vertices.contains_key(&edge.target) {
            return Err(GraphError::VertexNotFound(edge.target));
        }

        if let Some(source) = self.vertices.get_mut(&edge.source) {
            source.outgoing_edges.push(edge.id);
        }
        if edge.bidirectional && edge.target != edge.source {
            if let Some(target) = self.vertices.get_mut(&edge.target) {
                target.outgoing_edges.push(edge.id);
            }
        }

        self.edges.insert(edge.id, edge);
        Ok(())
    }

    /// Get a vertex.
    pub fn vertex(&self, id: Gfid) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// Get an edge.
    pub fn edge(&self, id: Gfid) -> Option<&GraphEdge> {
        self.edges.get(&id)
    }

    /// Whether the vertex exists.
    pub fn contains_vertex(&self, id: Gfid) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Whether the edge exists.
    pub fn contains_edge(&self, id: Gfid) -> bool {
        self.edges.contains_key(&id)
    }

    /// Outgoing edges of a vertex in ingestion order; empty for unknown ids.
    pub fn outgoing_edges(&self, id: Gfid) -> &[Gfid] {
        self.vertices
            .get(&id)
            .map(|v| v.outgoing_edges.as_slice())
            .unwrap_or(&[])
    }

    /// Direct cost of an edge.
    pub fn edge_cost(&self, id: Gfid) -> Option<f64> {
        self.edges.get(&id).map(|e| e.direct_cost)
    }

    /// Overwrite an edge's direct cost without validation, returning the old one.
    ///
    /// Only the K-shortest-paths override guard uses this; it may write
    /// `f64::INFINITY` and always writes the original back.
    pub(crate) fn replace_edge_cost(&mut self, id: Gfid, cost: f64) -> Option<f64> {
        self.edges
            .get_mut(&id)
            .map(|e| std::mem::replace(&mut e.direct_cost, cost))
    }

    /// Sum of direct costs over every edge on the path.
    ///
    /// Edges no longer present in the graph contribute nothing.
    pub fn path_cost(&self, path: &Path) -> f64 {
        path.edges().filter_map(|e| self.edge_cost(e)).sum()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All vertices ordered by id.
    pub fn vertices(&self) -> impl Iterator<Item = (Gfid, &Vertex)> + '_ {
        self.vertices.iter().map(|(id, v)| (*id, v))
    }

    /// All edges ordered by id.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.edges.values()
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathStep;

    fn edge(id: i64, source: i64, target: i64, bidirectional: bool, cost: f64) -> GraphEdge {
        GraphEdge {
            id: Gfid::new(id),
            source: Gfid::new(source),
            target: Gfid::new(target),
            bidirectional,
            direct_cost: cost,
            inverse_cost: cost,
        }
    }

    fn graph_with_vertices(ids: &[i64]) -> Graph {
        let mut graph = Graph::new();
        for id in ids {
            graph.add_vertex(Gfid::new(*id));
        }
        graph
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add_vertex(Gfid::new(1)));
        assert!(!graph.add_vertex(Gfid::new(1)));
        assert_eq!(graph.num_vertices(), 1);
    }

    #[test]
    fn test_bidirectional_edge_outgoing_from_both_ends() {
        let mut graph = graph_with_vertices(&[1, 2]);
        graph.add_edge(edge(10, 1, 2, true, 1.0)).unwrap();

        assert_eq!(graph.outgoing_edges(Gfid::new(1)), &[Gfid::new(10)]);
        assert_eq!(graph.outgoing_edges(Gfid::new(2)), &[Gfid::new(10)]);
    }

    #[test]
    fn test_directed_edge_outgoing_from_source_only() {
        let mut graph = graph_with_vertices(&[1, 2]);
        graph.add_edge(edge(10, 1, 2, false, 1.0)).unwrap();

        assert_eq!(graph.outgoing_edges(Gfid::new(1)), &[Gfid::new(10)]);
        assert!(graph.outgoing_edges(Gfid::new(2)).is_empty());
    }

    #[test]
    fn test_outgoing_edges_keep_insertion_order() {
        let mut graph = graph_with_vertices(&[1, 2, 3]);
        graph.add_edge(edge(30, 1, 3, true, 1.0)).unwrap();
        graph.add_edge(edge(10, 1, 2, true, 1.0)).unwrap();

        assert_eq!(graph.outgoing_edges(Gfid::new(1)), &[Gfid::new(30), Gfid::new(10)]);
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = graph_with_vertices(&[1, 2]);
        graph.add_edge(edge(10, 1, 2, true, 1.0)).unwrap();

        let err = graph.add_edge(edge(10, 2, 1, true, 3.0)).unwrap_err();
        assert_eq!(err, GraphError::DuplicateEdge(Gfid::new(10)));
        assert_eq!(graph.edge_cost(Gfid::new(10)), Some(1.0));
        assert_eq!(graph.outgoing_edges(Gfid::new(2)).len(), 1);
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        let mut graph = graph_with_vertices(&[1]);
        let err = graph.add_edge(edge(10, 1, 2, true, 1.0)).unwrap_err();
        assert_eq!(err, GraphError::VertexNotFound(Gfid::new(2)));
        assert!(graph.outgoing_edges(Gfid::new(1)).is_empty());
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_negative_and_nan_costs_rejected() {
        let mut graph = graph_with_vertices(&[1, 2]);
        assert!(matches!(
            graph.add_edge(edge(10, 1, 2, true, -1.0)),
            Err(GraphError::InvalidCost { .. })
        ));
        assert!(matches!(
            graph.add_edge(edge(11, 1, 2, true, f64::NAN)),
            Err(GraphError::InvalidCost { .. })
        ));
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut graph = graph_with_vertices(&[1]);
        graph.add_edge(edge(10, 1, 1, true, 1.0)).unwrap();
        assert_eq!(graph.outgoing_edges(Gfid::new(1)).len(), 1);
    }

    #[test]
    fn test_unknown_vertex_has_no_outgoing_edges() {
        let graph = Graph::new();
        assert!(graph.outgoing_edges(Gfid::new(99)).is_empty());
        assert!(graph.vertex(Gfid::new(99)).is_none());
    }

    #[test]
    fn test_path_cost_and_replace_cost() {
        let mut graph = graph_with_vertices(&[1, 2, 3]);
        graph.add_edge(edge(10, 1, 2, true, 1.5)).unwrap();
        graph.add_edge(edge(11, 2, 3, true, 2.0)).unwrap();

        let path = Path::from_steps(vec![
            PathStep::start(Gfid::new(1)),
            PathStep::new(Gfid::new(2), Some(Gfid::new(10))),
            PathStep::new(Gfid::new(3), Some(Gfid::new(11))),
        ]);
        assert_eq!(graph.path_cost(&path), 3.5);

        assert_eq!(graph.replace_edge_cost(Gfid::new(10), f64::INFINITY), Some(1.5));
        assert!(graph.path_cost(&path).is_infinite());
        assert_eq!(graph.replace_edge_cost(Gfid::new(10), 1.5), Some(f64::INFINITY));
        assert_eq!(graph.replace_edge_cost(Gfid::new(99), 1.0), None);
    }
}
