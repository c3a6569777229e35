//! K-shortest-paths engine (Yen's algorithm).
//!
//! Each round takes the most recently accepted path and, for every
//! non-terminal vertex on it (the spur node), searches for a detour:
//!
//! 1. The root path is the accepted path up to and including the spur node
//! 2. Every accepted path sharing that root has its next edge hidden
//! 3. Every root vertex before the spur node has all outgoing edges hidden
//! 4. Dijkstra from the spur node to the end on the modified graph
//! 5. Hidden edges are restored, then `root ++ spur path` is costed and
//!    pooled
//!
//! The cheapest pooled candidate becomes the next accepted path, and any
//! pooled duplicates of it are discarded.
//!
//! Hiding an edge means setting its direct cost to +inf through a
//! [`CostOverride`] guard, which writes the original costs back when it
//! is dropped. The graph is therefore unchanged after every spur search,
//! on every exit path.

use std::collections::HashSet;

use crate::graph::Graph;
use crate::types::{Gfid, Path};

use super::dijkstra::shortest_path;
use super::frontier::Frontier;

/// Scoped suppression of edge costs.
///
/// Holds the graph mutably for its lifetime; every suppressed edge gets
/// its original cost back on drop, in reverse order of suppression.
pub struct CostOverride<'g> {
    graph: &'g mut Graph,
    originals: Vec<(Gfid, f64)>,
    suppressed: HashSet<Gfid>,
}

impl<'g> CostOverride<'g> {
    /// Start a scope over `graph`.
    pub fn new(graph: &'g mut Graph) -> Self {
        Self {
            graph,
            originals: Vec::new(),
            suppressed: HashSet::new(),
        }
    }

    /// Set the edge's direct cost to +inf until the guard is dropped.
    ///
    /// Suppressing an edge twice, or an unknown edge, is a no-op.
    pub fn suppress(&mut self, edge: Gfid) {
        if !self.suppressed.insert(edge) {
            return;
        }
        if let Some(original) = self.graph.replace_edge_cost(edge, f64::INFINITY) {
            self.originals.push((edge, original));
        }
    }

    /// Suppress every outgoing edge of `vertex`.
    pub fn suppress_outgoing(&mut self, vertex: Gfid) {
        let edges = self.graph.outgoing_edges(vertex).to_vec();
        for edge in edges {
            self.suppress(edge);
        }
    }

    /// Number of edges currently suppressed.
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Whether nothing is suppressed.
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// The graph with suppressions applied.
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }
}

impl Drop for CostOverride<'_> {
    fn drop(&mut self) {
        while let Some((edge, original)) = self.originals.pop() {
            self.graph.replace_edge_cost(edge, original);
        }
    }
}

/// Up to `k` loopless paths from `start` to `end`, cheapest first.
///
/// The first path is always the [`shortest_path`]. Fewer than `k` paths
/// are returned when fewer distinct paths exist; none when `k == 0` or
/// `end` is unreachable.
pub fn k_shortest_paths(graph: &mut Graph, start: Gfid, end: Gfid, k: usize) -> Vec<Path> {
    if k == 0 {
        return Vec::new();
    }

    let first = shortest_path(graph, start, end);
    if first.is_empty() {
        return Vec::new();
    }

    let mut accepted: Vec<Path> = vec![first];
    let mut pool: Frontier<Path> = Frontier::new();

    while accepted.len() < k {
        let previous = &accepted[accepted.len() - 1];

        for spur_index in 0..previous.len().saturating_sub(1) {
            let root = &previous.steps()[..=spur_index];
            let spur_node = root[spur_index].vertex;

            let spur_path = {
                let mut overrides = CostOverride::new(graph);

                for path in &accepted {
                    if path.len() > spur_index + 1 && path.starts_with(root) {
                        if let Some(edge) = path.steps()[spur_index + 1].edge {
                            overrides.suppress(edge);
                        }
                    }
                }
                for step in &root[..spur_index] {
                    overrides.suppress_outgoing(step.vertex);
                }

                tracing::trace!(
                    spur = %spur_node,
                    suppressed = overrides.len(),
                    "Searching spur path"
                );
                shortest_path(overrides.graph(), spur_node, end)
            };

            if spur_path.is_empty() {
                continue;
            }

            let candidate: Path = root
                .iter()
                .chain(spur_path.steps().iter().skip(1))
                .copied()
                .collect();
            let cost = graph.path_cost(&candidate);
            pool.push(cost, candidate);
        }

        let Some((cost, next)) = pool.pop_min() else {
            break;
        };
        pool.retain(|candidate| !candidate.same_edges(&next));

        tracing::debug!(
            rank = accepted.len() + 1,
            cost,
            hops = next.len(),
            pooled = pool.len(),
            "Accepted alternative path"
        );
        accepted.push(next);
    }

    accepted
}
