//! Shortest-path engine.
//!
//! Classic Dijkstra over non-negative direct costs, producing a
//! single-source [`ShortestPathTree`] from which start-to-end paths are
//! extracted.
//!
//! ## Algorithm
//!
//! 1. Every vertex starts at distance +inf except the start (0)
//! 2. Pop the cheapest unvisited vertex `u` from the frontier, mark visited
//! 3. For each outgoing edge `e` of `u`, with `v` the opposite endpoint:
//!    relax `v` if it is unvisited, the new distance is strictly smaller,
//!    and `v` is not blocked
//! 4. Stop when the frontier is empty
//!
//! The start vertex itself is never checked against the blocking overlay.
//! An edge whose cost is +inf can never relax anything, which is how the
//! K-shortest-paths engine hides edges.

use std::collections::{HashMap, HashSet};

use crate::graph::Graph;
use crate::types::{Gfid, Path, PathStep, ShortestPathTree};

use super::frontier::Frontier;

/// Build the shortest path tree rooted at `start`.
///
/// Unknown start ids yield an empty tree.
pub fn shortest_path_tree(graph: &Graph, start: Gfid) -> ShortestPathTree {
    if !graph.contains_vertex(start) {
        return ShortestPathTree::empty();
    }

    let mut tree = ShortestPathTree::rooted(start);
    let mut distances: HashMap<Gfid, f64> = HashMap::new();
    let mut visited: HashSet<Gfid> = HashSet::new();
    let mut frontier: Frontier<Gfid> = Frontier::new();

    distances.insert(start, 0.0);
    frontier.push(0.0, start);

    while let Some((distance, u)) = frontier.pop_min() {
        if !visited.insert(u) {
            continue;
        }

        for &edge_id in graph.outgoing_edges(u) {
            let Some(edge) = graph.edge(edge_id) else {
                continue;
            };
            let v = edge.opposite(u);
            let candidate = distance + edge.direct_cost;
            let current = distances.get(&v).copied().unwrap_or(f64::INFINITY);

            if !visited.contains(&v) && candidate < current && !graph.is_blocked(v) {
                distances.insert(v, candidate);
                tree.set(v, edge_id, candidate);
                frontier.push(candidate, v);
            }
        }
    }

    tracing::trace!(start = %start, reached = tree.len(), "Shortest path tree built");
    tree
}

/// Walk `tree` back from `end` to its root.
///
/// Returns an empty path when `end` was not reached.
pub fn extract_path(graph: &Graph, tree: &ShortestPathTree, end: Gfid) -> Path {
    let Some(root) = tree.root() else {
        return Path::empty();
    };
    if !tree.contains(end) {
        return Path::empty();
    }

    let mut steps = Vec::new();
    let mut current = end;
    while current != root {
        let Some(Some(edge_id)) = tree.predecessor(current) else {
            return Path::empty();
        };
        let Some(edge) = graph.edge(edge_id) else {
            return Path::empty();
        };
        steps.push(PathStep::new(current, Some(edge_id)));
        current = edge.opposite(current);

        // A tree has at most one entry per vertex; a longer walk means the
        // tree does not belong to this graph.
        if steps.len() > tree.len() {
            return Path::empty();
        }
    }
    steps.push(PathStep::start(root));
    steps.reverse();

    Path::from_steps(steps)
}

/// Shortest path from `start` to `end`.
///
/// `start == end` yields the single-step path; an unreachable `end` yields
/// an empty path.
pub fn shortest_path(graph: &Graph, start: Gfid, end: Gfid) -> Path {
    let tree = shortest_path_tree(graph, start);
    extract_path(graph, &tree, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::types::ConnectionRecord;

    fn id(v: i64) -> Gfid {
        Gfid::new(v)
    }

    /// 1 -2- 2 -2- 3 -1- 4, plus a direct 1-3 edge of cost 10.
    fn diamond() -> Graph {
        GraphBuilder::build(vec![
            ConnectionRecord::bidirectional(1, 2, 12, 1.0),
            ConnectionRecord::bidirectional(2, 3, 23, 2.0),
            ConnectionRecord::bidirectional(1, 3, 13, 10.0),
            ConnectionRecord::bidirectional(3, 4, 34, 1.0),
        ])
        .0
    }

    fn vertices(path: &Path) -> Vec<i64> {
        path.vertices().map(|v| v.get()).collect()
    }

    #[test]
    fn test_tree_distances() {
        let graph = diamond();
        let tree = shortest_path_tree(&graph, id(1));

        assert_eq!(tree.distance(id(1)), Some(0.0));
        assert_eq!(tree.distance(id(2)), Some(1.0));
        assert_eq!(tree.distance(id(3)), Some(3.0));
        assert_eq!(tree.distance(id(4)), Some(4.0));
        assert_eq!(tree.predecessor(id(3)), Some(Some(id(23))));
    }

    #[test]
    fn test_shortest_path_prefers_cheaper_detour() {
        let graph = diamond();
        let path = shortest_path(&graph, id(1), id(4));

        assert_eq!(vertices(&path), vec![1, 2, 3, 4]);
        assert_eq!(path.steps()[0].edge, None);
        assert_eq!(graph.path_cost(&path), 4.0);
    }

    #[test]
    fn test_path_to_self() {
        let graph = diamond();
        let path = shortest_path(&graph, id(2), id(2));
        assert_eq!(path.steps(), &[PathStep::start(id(2))]);
        assert_eq!(graph.path_cost(&path), 0.0);
    }

    #[test]
    fn test_unknown_ids_yield_empty() {
        let graph = diamond();
        assert!(shortest_path_tree(&graph, id(99)).is_empty());
        assert!(shortest_path(&graph, id(99), id(99)).is_empty());
        assert!(shortest_path(&graph, id(1), id(99)).is_empty());
    }

    #[test]
    fn test_directed_edges_respected() {
        let graph = GraphBuilder::build(vec![
            ConnectionRecord::directed(1, 2, 12, 1.0),
            ConnectionRecord::directed(2, 3, 23, 1.0),
        ])
        .0;

        assert_eq!(vertices(&shortest_path(&graph, id(1), id(3))), vec![1, 2, 3]);
        assert!(shortest_path(&graph, id(3), id(1)).is_empty());
    }

    #[test]
    fn test_bidirectional_edge_traversed_backwards_charges_direct_cost() {
        let graph = GraphBuilder::build(vec![ConnectionRecord::new(
            1,
            2,
            12,
            crate::types::Direction::Bidirectional,
            3.0,
            100.0,
        )])
        .0;

        let tree = shortest_path_tree(&graph, id(2));
        assert_eq!(tree.distance(id(1)), Some(3.0));
    }

    #[test]
    fn test_blocked_interior_vertex_reroutes() {
        let mut graph = diamond();
        graph.block(id(2)).unwrap();

        let path = shortest_path(&graph, id(1), id(4));
        assert_eq!(vertices(&path), vec![1, 3, 4]);
        assert_eq!(graph.path_cost(&path), 11.0);
    }

    #[test]
    fn test_blocked_start_still_expands() {
        let mut graph = diamond();
        graph.block(id(1)).unwrap();

        assert_eq!(vertices(&shortest_path(&graph, id(1), id(4))), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_blocked_destination_unreachable() {
        let mut graph = diamond();
        graph.block(id(4)).unwrap();
        assert!(shortest_path(&graph, id(1), id(4)).is_empty());
    }

    #[test]
    fn test_infinite_edges_are_never_taken() {
        let mut graph = diamond();
        graph.replace_edge_cost(id(34), f64::INFINITY);
        assert!(shortest_path(&graph, id(1), id(4)).is_empty());
    }

    #[test]
    fn test_equal_cost_ties_are_deterministic() {
        // Two equal-cost routes 1-2-4 and 1-3-4.
        let graph = GraphBuilder::build(vec![
            ConnectionRecord::bidirectional(1, 2, 12, 1.0),
            ConnectionRecord::bidirectional(1, 3, 13, 1.0),
            ConnectionRecord::bidirectional(2, 4, 24, 1.0),
            ConnectionRecord::bidirectional(3, 4, 34, 1.0),
        ])
        .0;

        let first = shortest_path(&graph, id(1), id(4));
        for _ in 0..20 {
            assert_eq!(shortest_path(&graph, id(1), id(4)), first);
        }
        // Vertex 2 is discovered first, so it is expanded first and claims 4.
        assert_eq!(vertices(&first), vec![1, 2, 4]);
    }
}
