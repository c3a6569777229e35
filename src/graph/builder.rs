//! Graph builder.
//!
//! Consumes the network layer's connection records in one pass and
//! populates a fresh [`Graph`]. A bad record is skipped and reported; it
//! never aborts the build.

use serde::{Serialize, Serializer};

use crate::error::GraphError;
use crate::types::{ConnectionRecord, Direction, GraphEdge};

use super::Graph;

/// A record the builder could not insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordFailure {
    /// Position of the record in the input stream.
    pub index: usize,
    /// The rejected record.
    pub record: ConnectionRecord,
    /// Why it was rejected.
    #[serde(serialize_with = "serialize_error")]
    pub error: GraphError,
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildReport {
    /// Records read from the input.
    pub records_read: usize,
    /// Vertices created.
    pub vertices_added: usize,
    /// Edges inserted.
    pub edges_added: usize,
    /// Records that were skipped.
    pub failures: Vec<RecordFailure>,
}

impl BuildReport {
    /// Whether every record was inserted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a [`Graph`] from connection records.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    report: BuildReport,
}

impl GraphBuilder {
    /// Start from an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a full scan of connection records.
    pub fn build<I>(connections: I) -> (Graph, BuildReport)
    where
        I: IntoIterator<Item = ConnectionRecord>,
    {
        let mut builder = Self::new();
        builder.extend(connections);
        builder.finish()
    }

    /// Ingest a batch of records.
    pub fn extend<I>(&mut self, connections: I)
    where
        I: IntoIterator<Item = ConnectionRecord>,
    {
        for record in connections {
            self.push(record);
        }
    }

    /// Ingest one record, recording a failure instead of returning it.
    pub fn push(&mut self, record: ConnectionRecord) {
        let index = self.report.records_read;
        self.report.records_read += 1;

        if let Err(error) = self.insert(&record) {
            tracing::warn!(
                index,
                connector = %record.connector_id,
                source = %record.source_id,
                target = %record.target_id,
                error = %error,
                "Skipping connection record"
            );
            self.report.failures.push(RecordFailure { index, record, error });
        }
    }

    fn insert(&mut self, record: &ConnectionRecord) -> Result<(), GraphError> {
        // Endpoints exist even when the edge itself is rejected.
        for id in [record.source_id, record.target_id] {
            if self.graph.add_vertex(id) {
                self.report.vertices_added += 1;
            }
        }

        if record.cost.is_nan() || record.cost < 0.0 {
            return Err(GraphError::InvalidCost {
                edge: record.connector_id,
                cost: record.cost,
            });
        }

        let (source, target) = match record.direction {
            Direction::TargetToSource => (record.target_id, record.source_id),
            _ => (record.source_id, record.target_id),
        };

        self.graph.add_edge(GraphEdge {
            id: record.connector_id,
            source,
            target,
            bidirectional: record.direction == Direction::Bidirectional,
            direct_cost: record.cost,
            inverse_cost: record.inverse_cost,
        })?;
        self.report.edges_added += 1;
        Ok(())
    }

    /// Finish and hand over the graph with its report.
    pub fn finish(self) -> (Graph, BuildReport) {
        tracing::debug!(
            records = self.report.records_read,
            vertices = self.graph.num_vertices(),
            edges = self.graph.num_edges(),
            failures = self.report.failures.len(),
            "Graph build finished"
        );
        (self.graph, self.report)
    }
}

fn serialize_error<S: Serializer>(error: &GraphError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
