//! # network-analysis-kernel
//!
//! Graph analysis over a utility network: shortest paths, K alternative
//! paths and blocked-aware reachability.
//!
//! The kernel answers two questions for a network of connectors:
//!
//! > What is the cheapest way (or the K cheapest ways) from A to B?
//!
//! > What can be reached from these emitters without crossing a blocked vertex?
//!
//! ## Core Contract
//!
//! 1. Build an adjacency graph from connection records, keyed by GFID
//! 2. Maintain a blocking overlay, mirrored to a persistence store
//! 3. Run deterministic traversals that never leave temporary state behind
//!
//! ## Architecture
//!
//! ```text
//! ConnectionRecords → GraphBuilder → Graph ← blocking overlay ↔ BlockedVertexStore
//!                                      ↓
//!                     Dijkstra / Yen / BFS engines → query results
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same records + same blocked set → identical paths, in identical order
//! - Equal-cost ties resolve by insertion order, never by hash order
//! - A K-shortest-paths query leaves the graph fingerprint unchanged

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod error;
pub mod canonical;
pub mod config;
pub mod graph;
pub mod engine;
pub mod store;
pub mod analyser;
pub mod query;

// Re-exports
pub use types::{
    ConnectionRecord, Direction, Gfid, GraphEdge, Path, PathStep, ShortestPathTree, Vertex,
};
pub use error::{AnalysisError, GraphError};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
pub use config::{AnalyserConfig, ConfigError};
pub use graph::{BuildReport, Graph, GraphBuilder, GraphSnapshot, RecordFailure};
pub use engine::{connected_component, k_shortest_paths, shortest_path, shortest_path_tree};
pub use store::{BlockedVertexStore, InMemoryBlockedStore, JsonFileBlockedStore, StoreError};
pub use analyser::{Analyser, SharedAnalyser};
pub use query::{
    resource_distribution_query, routing_query, AnalysisRequest, AnalysisResponse, FeatureKind,
    ResourceDistribution, ResultFeature, Route, RouteSet,
};

/// Schema version embedded in every [`GraphSnapshot`].
pub const NETWORK_KERNEL_SCHEMA_VERSION: &str = "1.0.0";

/// Version tag of the default [`AnalyserConfig`].
pub const DEFAULT_CONFIG_VERSION: &str = "analyser_config_v1";
