//! Analysis session.
//!
//! An [`Analyser`] owns one graph, rebuilt wholesale by
//! [`Analyser::prepare_graph`], and the persistence collaborator that
//! records blocked vertices. Traversals before the first preparation fail
//! with [`AnalysisError::GraphNotPrepared`].
//!
//! ## Blocking contract
//!
//! `block`/`unblock` validate against the graph, then mirror to the store,
//! then flip the in-memory flag. A rejected request or a failed mirror
//! leaves both sides untouched.
//!
//! ## Concurrency
//!
//! Not internally synchronized. `k_shortest_paths` mutates edge costs
//! temporarily, so even queries need exclusive access; use
//! [`Analyser::into_shared`] to hand one analyser to several threads.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::AnalyserConfig;
use crate::engine;
use crate::error::{AnalysisError, GraphError};
use crate::graph::{BuildReport, Graph, GraphBuilder, GraphSnapshot};
use crate::store::BlockedVertexStore;
use crate::types::{ConnectionRecord, Gfid, Path, ShortestPathTree};

/// An analyser shared between threads.
pub type SharedAnalyser<S> = Arc<Mutex<Analyser<S>>>;

/// Graph analysis session over a feature network.
pub struct Analyser<S: BlockedVertexStore> {
    store: S,
    config: AnalyserConfig,
    graph: Option<Graph>,
}

impl<S: BlockedVertexStore> Analyser<S> {
    /// Create an analyser with no graph yet.
    pub fn new(store: S, config: AnalyserConfig) -> Self {
        Self {
            store,
            config,
            graph: None,
        }
    }

    /// Build the graph from a full scan of connection records.
    ///
    /// Replaces any previous graph. Bad records are skipped and listed in
    /// the returned report. When `restore_blocked_on_prepare` is set, the
    /// store's blocked ids are re-applied to the new graph; with
    /// `strict_bootstrap` an id missing from the graph fails the call and
    /// the previous graph stays in place.
    pub fn prepare_graph<I>(&mut self, connections: I) -> Result<BuildReport, AnalysisError>
    where
        I: IntoIterator<Item = ConnectionRecord>,
    {
        let (mut graph, report) = GraphBuilder::build(connections);

        if self.config.restore_blocked_on_prepare {
            let persisted = self.store.load().map_err(AnalysisError::from_store)?;
            for id in persisted {
                match graph.block(id) {
                    Ok(()) | Err(GraphError::AlreadyBlocked(_)) => {}
                    Err(e) if self.config.strict_bootstrap => return Err(e.into()),
                    Err(e) => {
                        tracing::warn!(vertex = %id, error = %e, "Skipping persisted block");
                    }
                }
            }
        }

        let snapshot = GraphSnapshot::compute(&graph);
        tracing::info!(
            snapshot_id = %snapshot.snapshot_id,
            vertices = snapshot.vertex_count,
            edges = snapshot.edge_count,
            blocked = snapshot.blocked_count,
            failures = report.failures.len(),
            config_hash = %self.config.params_hash(),
            "Graph prepared"
        );

        self.graph = Some(graph);
        Ok(report)
    }

    /// Whether a graph has been prepared.
    pub fn is_prepared(&self) -> bool {
        self.graph.is_some()
    }

    /// The prepared graph.
    pub fn graph(&self) -> Result<&Graph, AnalysisError> {
        self.graph.as_ref().ok_or(AnalysisError::GraphNotPrepared)
    }

    /// Fingerprint of the prepared graph.
    pub fn snapshot(&self) -> Result<GraphSnapshot, AnalysisError> {
        Ok(GraphSnapshot::compute(self.graph()?))
    }

    /// Block a vertex and record it in the store.
    pub fn block(&mut self, id: Gfid) -> Result<(), AnalysisError> {
        let graph = self.graph.as_mut().ok_or(AnalysisError::GraphNotPrepared)?;
        graph.check_block(id)?;
        self.store.add(id).map_err(AnalysisError::from_store)?;
        graph.block(id)?;

        tracing::info!(vertex = %id, "Vertex blocked");
        Ok(())
    }

    /// Unblock a vertex and remove it from the store.
    pub fn unblock(&mut self, id: Gfid) -> Result<(), AnalysisError> {
        let graph = self.graph.as_mut().ok_or(AnalysisError::GraphNotPrepared)?;
        graph.check_unblock(id)?;
        self.store.remove(id).map_err(AnalysisError::from_store)?;
        graph.unblock(id)?;

        tracing::info!(vertex = %id, "Vertex unblocked");
        Ok(())
    }

    /// Unblock every vertex and clear the store.
    ///
    /// The overlay itself cannot fail to clear; only the mirror can, in
    /// which case nothing changes.
    pub fn unblock_all(&mut self) -> Result<(), AnalysisError> {
        let graph = self.graph.as_mut().ok_or(AnalysisError::GraphNotPrepared)?;
        self.store.clear().map_err(AnalysisError::from_store)?;
        graph.unblock_all();

        tracing::info!("All vertices unblocked");
        Ok(())
    }

    /// Whether a vertex is blocked. False for unknown ids or no graph.
    pub fn is_blocked(&self, id: Gfid) -> bool {
        self.graph.as_ref().map(|g| g.is_blocked(id)).unwrap_or(false)
    }

    /// Shortest path tree rooted at `start`.
    pub fn shortest_path_tree(&self, start: Gfid) -> Result<ShortestPathTree, AnalysisError> {
        Ok(engine::shortest_path_tree(self.graph()?, start))
    }

    /// Shortest path from `start` to `end`; empty when unreachable.
    pub fn shortest_path(&self, start: Gfid, end: Gfid) -> Result<Path, AnalysisError> {
        Ok(engine::shortest_path(self.graph()?, start, end))
    }

    /// Up to `k` cheapest loopless paths from `start` to `end`.
    ///
    /// `k` must be in `1..=max_k`.
    pub fn k_shortest_paths(
        &mut self,
        start: Gfid,
        end: Gfid,
        k: usize,
    ) -> Result<Vec<Path>, AnalysisError> {
        let max = self.config.max_k;
        if k == 0 || k > max {
            return Err(AnalysisError::InvalidK { k, max });
        }
        let graph = self.graph.as_mut().ok_or(AnalysisError::GraphNotPrepared)?;
        Ok(engine::k_shortest_paths(graph, start, end, k))
    }

    /// Every edge reachable from `seeds` without crossing a blocked vertex.
    pub fn connected_component(
        &self,
        seeds: &BTreeSet<Gfid>,
    ) -> Result<BTreeSet<Gfid>, AnalysisError> {
        Ok(engine::connected_component(self.graph()?, seeds))
    }

    /// Total direct cost of a path on the prepared graph.
    pub fn path_cost(&self, path: &Path) -> Result<f64, AnalysisError> {
        Ok(self.graph()?.path_cost(path))
    }

    /// Get the configuration.
    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Wrap in a mutex for sharing between threads.
    pub fn into_shared(self) -> SharedAnalyser<S> {
        Arc::new(Mutex::new(self))
    }
}
