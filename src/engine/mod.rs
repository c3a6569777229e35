//! Traversal engines.
//!
//! Every engine is a free function over a [`Graph`](crate::graph::Graph)
//! and its blocking overlay. None keep state between calls; the
//! K-shortest-paths engine mutates edge costs temporarily and restores
//! them before returning.

pub mod frontier;
pub mod dijkstra;
pub mod yen;
pub mod reachability;

pub use frontier::{Frontier, OrderedCost};
pub use dijkstra::{extract_path, shortest_path, shortest_path_tree};
pub use yen::{k_shortest_paths, CostOverride};
pub use reachability::connected_component;
