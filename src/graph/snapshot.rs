//! Graph snapshot identity.
//!
//! A `GraphSnapshot` fingerprints the whole graph state (topology, costs
//! and blocking overlay) so callers can prove two analyses ran against the
//! same network, or that an analysis left the graph untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, cost_bits};
use crate::NETWORK_KERNEL_SCHEMA_VERSION;

use super::Graph;

/// A deterministic fingerprint of the graph state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// xxh64 over every component below except `computed_at`.
    pub snapshot_id: String,
    /// Number of vertices.
    pub vertex_count: u64,
    /// Number of edges.
    pub edge_count: u64,
    /// Number of blocked vertices.
    pub blocked_count: u64,
    /// Schema version used for types.
    pub schema_version: String,
    /// Hash of sorted vertex ids.
    pub vertex_hash: String,
    /// Hash of sorted `(edge, source, target, bidirectional)` tuples.
    pub topology_hash: String,
    /// Hash of sorted `(edge, direct cost bits, inverse cost bits)` tuples.
    pub cost_hash: String,
    /// Hash of sorted blocked vertex ids.
    pub blocked_hash: String,
    /// When this snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct SnapshotIdInput<'a> {
    vertex_count: u64,
    edge_count: u64,
    blocked_count: u64,
    schema_version: &'a str,
    vertex_hash: &'a str,
    topology_hash: &'a str,
    cost_hash: &'a str,
    blocked_hash: &'a str,
}

impl GraphSnapshot {
    /// Fingerprint the current state of `graph`.
    ///
    /// Graph maps are ordered by id, so the result does not depend on the
    /// order connections were ingested in.
    pub fn compute(graph: &Graph) -> Self {
        let vertex_ids: Vec<i64> = graph.vertices().map(|(id, _)| id.get()).collect();
        let blocked_ids: Vec<i64> = graph.blocked_vertices().iter().map(|id| id.get()).collect();

        let topology: Vec<(i64, i64, i64, bool)> = graph
            .edges()
            .map(|e| (e.id.get(), e.source.get(), e.target.get(), e.bidirectional))
            .collect();
        let costs: Vec<(i64, u64, u64)> = graph
            .edges()
            .map(|e| (e.id.get(), cost_bits(e.direct_cost), cost_bits(e.inverse_cost)))
            .collect();

        let vertex_hash = canonical_hash_hex(&vertex_ids);
        let topology_hash = canonical_hash_hex(&topology);
        let cost_hash = canonical_hash_hex(&costs);
        let blocked_hash = canonical_hash_hex(&blocked_ids);

        let vertex_count = vertex_ids.len() as u64;
        let edge_count = topology.len() as u64;
        let blocked_count = blocked_ids.len() as u64;

        let snapshot_id = canonical_hash_hex(&SnapshotIdInput {
            vertex_count,
            edge_count,
            blocked_count,
            schema_version: NETWORK_KERNEL_SCHEMA_VERSION,
            vertex_hash: &vertex_hash,
            topology_hash: &topology_hash,
            cost_hash: &cost_hash,
            blocked_hash: &blocked_hash,
        });

        Self {
            snapshot_id,
            vertex_count,
            edge_count,
            blocked_count,
            schema_version: NETWORK_KERNEL_SCHEMA_VERSION.to_string(),
            vertex_hash,
            topology_hash,
            cost_hash,
            blocked_hash,
            computed_at: Utc::now(),
        }
    }

    /// Verify that this snapshot still matches `graph`.
    pub fn verify(&self, graph: &Graph) -> bool {
        self.snapshot_id == Self::compute(graph).snapshot_id
    }
}
