//! Reachability engine ("resource distribution").
//!
//! Multi-source breadth-first search from a set of emitter vertices,
//! collecting every edge traversed. Seeds are processed whatever their
//! own blocked state; only neighbours are filtered by the blocking overlay.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::graph::Graph;
use crate::types::Gfid;

/// Every edge reachable from `seeds` without expanding into a blocked vertex.
///
/// An edge leading into a blocked vertex is still part of the result (it
/// is traversed up to the barrier), but the blocked vertex is not expanded.
pub fn connected_component(graph: &Graph, seeds: &BTreeSet<Gfid>) -> BTreeSet<Gfid> {
    let mut reached: BTreeSet<Gfid> = BTreeSet::new();
    let mut visited: HashSet<Gfid> = HashSet::new();
    let mut queue: VecDeque<Gfid> = seeds.iter().copied().collect();

    while let Some(u) = queue.pop_front() {
        if !visited.insert(u) {
            continue;
        }

        for &edge_id in graph.outgoing_edges(u) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            reached.insert(edge_id);

            let v = edge.opposite(u);
            if !visited.contains(&v) && !graph.is_blocked(v) {
                queue.push_back(v);
            }
        }
    }

    tracing::trace!(
        seeds = seeds.len(),
        vertices = visited.len(),
        edges = reached.len(),
        "Connected component collected"
    );
    reached
}
