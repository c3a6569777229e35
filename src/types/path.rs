//! Path and shortest-path-tree results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::gfid::Gfid;

/// One hop of a path: the vertex reached and the edge used to reach it.
///
/// The first step of every non-empty path has `edge == None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathStep {
    /// Vertex reached.
    pub vertex: Gfid,
    /// Edge taken into `vertex`, `None` for the start.
    pub edge: Option<Gfid>,
}

impl PathStep {
    /// Create a step.
    pub fn new(vertex: Gfid, edge: Option<Gfid>) -> Self {
        Self { vertex, edge }
    }

    /// Create the start step of a path.
    pub fn start(vertex: Gfid) -> Self {
        Self { vertex, edge: None }
    }
}

/// Ordered sequence of steps from start to end.
///
/// An empty path means no path was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    /// The "no path found" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a path from ordered steps.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Whether no path was found.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of vertices on the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Start vertex, if any.
    pub fn start(&self) -> Option<Gfid> {
        self.steps.first().map(|s| s.vertex)
    }

    /// End vertex, if any.
    pub fn end(&self) -> Option<Gfid> {
        self.steps.last().map(|s| s.vertex)
    }

    /// Vertices in order.
    pub fn vertices(&self) -> impl Iterator<Item = Gfid> + '_ {
        self.steps.iter().map(|s| s.vertex)
    }

    /// Edges in order (the start sentinel is skipped).
    pub fn edges(&self) -> impl Iterator<Item = Gfid> + '_ {
        self.steps.iter().filter_map(|s| s.edge)
    }

    /// Whether both paths use the same ordered edge sequence.
    pub fn same_edges(&self, other: &Path) -> bool {
        self.len() == other.len() && self.edges().eq(other.edges())
    }

    /// Whether the first steps of this path equal `prefix`.
    pub fn starts_with(&self, prefix: &[PathStep]) -> bool {
        self.steps.starts_with(prefix)
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

/// Single-source shortest path tree.
///
/// Maps every reached vertex to the edge it was reached through
/// (`None` for the root) and its accumulated distance. Unreachable
/// vertices are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathTree {
    root: Option<Gfid>,
    predecessors: BTreeMap<Gfid, Option<Gfid>>,
    distances: BTreeMap<Gfid, f64>,
}

impl ShortestPathTree {
    /// Tree rooted at `root` containing only the root.
    pub fn rooted(root: Gfid) -> Self {
        let mut tree = Self {
            root: Some(root),
            ..Self::default()
        };
        tree.predecessors.insert(root, None);
        tree.distances.insert(root, 0.0);
        tree
    }

    /// Tree that reaches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record that `vertex` is reached through `edge` at `distance`.
    pub(crate) fn set(&mut self, vertex: Gfid, edge: Gfid, distance: f64) {
        self.predecessors.insert(vertex, Some(edge));
        self.distances.insert(vertex, distance);
    }

    /// Root vertex.
    pub fn root(&self) -> Option<Gfid> {
        self.root
    }

    /// Whether `vertex` was reached.
    pub fn contains(&self, vertex: Gfid) -> bool {
        self.predecessors.contains_key(&vertex)
    }

    /// Predecessor edge of `vertex`: `None` if unreached, `Some(None)` for the root.
    pub fn predecessor(&self, vertex: Gfid) -> Option<Option<Gfid>> {
        self.predecessors.get(&vertex).copied()
    }

    /// Accumulated distance to `vertex`.
    pub fn distance(&self, vertex: Gfid) -> Option<f64> {
        self.distances.get(&vertex).copied()
    }

    /// Number of reached vertices.
    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    /// Whether nothing was reached.
    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    /// Reached vertices with their predecessor edges, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = (Gfid, Option<Gfid>)> + '_ {
        self.predecessors.iter().map(|(v, e)| (*v, *e))
    }
}
