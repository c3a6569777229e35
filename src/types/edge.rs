//! Edge and connection types for the analysis kernel.

use serde::{Deserialize, Serialize};
use super::gfid::Gfid;

/// Traversal direction of a connection as recorded by the network layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Traversable from either end.
    #[default]
    Bidirectional,
    /// Traversable only from source to target.
    SourceToTarget,
    /// Traversable only from target to source.
    TargetToSource,
}

impl Direction {
    /// Map the storage layer's integer direction flag.
    ///
    /// `1` is source-to-target, `2` is target-to-source, anything else
    /// is treated as bidirectional.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::SourceToTarget,
            2 => Self::TargetToSource,
            _ => Self::Bidirectional,
        }
    }

    /// Integer flag used by the storage layer.
    pub fn code(&self) -> i32 {
        match self {
            Self::Bidirectional => 0,
            Self::SourceToTarget => 1,
            Self::TargetToSource => 2,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bidirectional => write!(f, "bidirectional"),
            Self::SourceToTarget => write!(f, "source_to_target"),
            Self::TargetToSource => write!(f, "target_to_source"),
        }
    }
}

/// One connection as supplied by the network storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Source vertex feature.
    pub source_id: Gfid,
    /// Target vertex feature.
    pub target_id: Gfid,
    /// Connector feature acting as the edge (may be virtual).
    pub connector_id: Gfid,
    /// Traversal direction.
    #[serde(default)]
    pub direction: Direction,
    /// Cost of traversing the connector.
    pub cost: f64,
    /// Cost in the reverse direction. Carried through, never traversed.
    #[serde(default)]
    pub inverse_cost: f64,
}

impl ConnectionRecord {
    /// Create a new connection record.
    pub fn new(
        source_id: impl Into<Gfid>,
        target_id: impl Into<Gfid>,
        connector_id: impl Into<Gfid>,
        direction: Direction,
        cost: f64,
        inverse_cost: f64,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            connector_id: connector_id.into(),
            direction,
            cost,
            inverse_cost,
        }
    }

    /// Create a bidirectional connection with equal costs both ways.
    pub fn bidirectional(
        source_id: impl Into<Gfid>,
        target_id: impl Into<Gfid>,
        connector_id: impl Into<Gfid>,
        cost: f64,
    ) -> Self {
        Self::new(source_id, target_id, connector_id, Direction::Bidirectional, cost, cost)
    }

    /// Create a one-way connection from source to target.
    pub fn directed(
        source_id: impl Into<Gfid>,
        target_id: impl Into<Gfid>,
        connector_id: impl Into<Gfid>,
        cost: f64,
    ) -> Self {
        Self::new(source_id, target_id, connector_id, Direction::SourceToTarget, cost, cost)
    }
}

/// Edge stored in the graph.
///
/// `source` is always the traversal-forward end; records arriving as
/// target-to-source are swapped before insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Connector feature identifier.
    pub id: Gfid,
    /// Forward end.
    pub source: Gfid,
    /// Far end.
    pub target: Gfid,
    /// Whether the edge is outgoing from both ends.
    pub bidirectional: bool,
    /// Cost charged by every traversal.
    pub direct_cost: f64,
    /// Passthrough reverse cost.
    pub inverse_cost: f64,
}

impl GraphEdge {
    /// The endpoint on the other side of `from`.
    ///
    /// For any vertex that is not `source` this returns `source`, which is
    /// exactly what a traversal entering a bidirectional edge from its
    /// target needs.
    pub fn opposite(&self, from: Gfid) -> Gfid {
        if from == self.source {
            self.target
        } else {
            self.source
        }
    }
}
