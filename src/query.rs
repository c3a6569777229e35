//! Result-layer queries.
//!
//! The two query kinds the surrounding toolkit exposes, routing and
//! resource distribution, as free functions over an [`Analyser`]. Results
//! are flat, ordered rows of feature ids that a geometry collaborator can
//! turn into a renderable layer without knowing anything about the graph.
//!
//! "No path found" and "fewer than k paths" are logged as warnings and
//! returned as empty or short results, never as errors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analyser::Analyser;
use crate::error::AnalysisError;
use crate::store::BlockedVertexStore;
use crate::types::{Gfid, Path};

/// Kind of feature a result row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// A vertex feature.
    Vertex,
    /// A connector feature.
    Edge,
}

/// One row of a result layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFeature {
    /// 1-based number of the path (or distribution) the row belongs to.
    pub path_num: usize,
    /// Position of the row within its path.
    pub ordinal: usize,
    /// Feature identifier.
    pub gfid: Gfid,
    /// Vertex or edge.
    pub kind: FeatureKind,
    /// Whether the vertex was blocked at query time (always false for edges).
    pub blocked: bool,
}

/// One path of a routing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// 1-based rank, cheapest first.
    pub path_num: usize,
    /// Total direct cost.
    pub cost: f64,
    /// The path itself.
    pub path: Path,
    /// Alternating vertex/edge rows in travel order.
    pub features: Vec<ResultFeature>,
}

/// Result of a routing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    /// Start vertex.
    pub start: Gfid,
    /// End vertex.
    pub end: Gfid,
    /// Number of paths asked for.
    pub requested: usize,
    /// Paths found, cheapest first.
    pub routes: Vec<Route>,
}

impl RouteSet {
    /// Whether no path was found.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Whether fewer paths than requested were found.
    pub fn is_short(&self) -> bool {
        self.routes.len() < self.requested
    }

    /// Every row of every route, in order.
    pub fn features(&self) -> impl Iterator<Item = &ResultFeature> + '_ {
        self.routes.iter().flat_map(|r| r.features.iter())
    }
}

/// Result of a resource distribution query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDistribution {
    /// Seed vertices.
    pub emitters: BTreeSet<Gfid>,
    /// Every reachable edge.
    pub edges: BTreeSet<Gfid>,
    /// Endpoints of the reachable edges.
    pub vertices: BTreeSet<Gfid>,
    /// Vertex rows then edge rows, each ordered by id.
    pub features: Vec<ResultFeature>,
}

/// Cheapest route, or up to `k` alternatives, from `start` to `end`.
pub fn routing_query<S: BlockedVertexStore>(
    analyser: &mut Analyser<S>,
    start: Gfid,
    end: Gfid,
    k: usize,
) -> Result<RouteSet, AnalysisError> {
    let paths = if k == 1 {
        let path = analyser.shortest_path(start, end)?;
        if path.is_empty() {
            Vec::new()
        } else {
            vec![path]
        }
    } else {
        analyser.k_shortest_paths(start, end, k)?
    };

    let graph = analyser.graph()?;
    let routes: Vec<Route> = paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            let path_num = i + 1;
            let mut features = Vec::with_capacity(path.len() * 2);
            for step in path.steps() {
                if let Some(edge) = step.edge {
                    features.push(ResultFeature {
                        path_num,
                        ordinal: features.len(),
                        gfid: edge,
                        kind: FeatureKind::Edge,
                        blocked: false,
                    });
                }
                features.push(ResultFeature {
                    path_num,
                    ordinal: features.len(),
                    gfid: step.vertex,
                    kind: FeatureKind::Vertex,
                    blocked: graph.is_blocked(step.vertex),
                });
            }
            Route {
                path_num,
                cost: graph.path_cost(&path),
                path,
                features,
            }
        })
        .collect();

    if routes.is_empty() {
        tracing::warn!(start = %start, end = %end, "No path found");
    } else if routes.len() < k {
        tracing::warn!(
            start = %start,
            end = %end,
            requested = k,
            found = routes.len(),
            "Fewer distinct paths than requested"
        );
    }

    Ok(RouteSet {
        start,
        end,
        requested: k,
        routes,
    })
}

/// Everything reachable from `emitters` without crossing a blocked vertex.
pub fn resource_distribution_query<S: BlockedVertexStore>(
    analyser: &Analyser<S>,
    emitters: &BTreeSet<Gfid>,
) -> Result<ResourceDistribution, AnalysisError> {
    let edges = analyser.connected_component(emitters)?;
    let graph = analyser.graph()?;

    let vertices: BTreeSet<Gfid> = edges
        .iter()
        .filter_map(|e| graph.edge(*e))
        .flat_map(|e| [e.source, e.target])
        .collect();

    let vertex_rows = vertices.iter().map(|v| (*v, FeatureKind::Vertex, graph.is_blocked(*v)));
    let edge_rows = edges.iter().map(|e| (*e, FeatureKind::Edge, false));
    let features = vertex_rows
        .chain(edge_rows)
        .enumerate()
        .map(|(ordinal, (gfid, kind, blocked))| ResultFeature {
            path_num: 1,
            ordinal,
            gfid,
            kind,
            blocked,
        })
        .collect();

    if edges.is_empty() {
        tracing::warn!(emitters = emitters.len(), "Nothing reachable from emitters");
    }

    Ok(ResourceDistribution {
        emitters: emitters.clone(),
        edges,
        vertices,
        features,
    })
}

fn default_k() -> usize {
    1
}

/// A single analysis request, as read by the runner binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisRequest {
    /// Route between two vertices.
    Routing {
        /// Start vertex.
        start: Gfid,
        /// End vertex.
        end: Gfid,
        /// Number of alternatives.
        #[serde(default = "default_k")]
        k: usize,
    },
    /// Reachability from emitter vertices.
    ResourceDistribution {
        /// Seed vertices.
        emitters: BTreeSet<Gfid>,
    },
    /// Block vertices.
    Block {
        /// Vertices to block.
        vertices: Vec<Gfid>,
    },
    /// Unblock vertices.
    Unblock {
        /// Vertices to unblock.
        vertices: Vec<Gfid>,
    },
    /// Unblock every vertex.
    UnblockAll,
}

/// Response to an [`AnalysisRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResponse {
    /// Routing result.
    Routes(RouteSet),
    /// Resource distribution result.
    Distribution(ResourceDistribution),
    /// Blocked vertices after a blocking request.
    Blocked {
        /// Currently blocked vertices.
        vertices: Vec<Gfid>,
    },
}

impl AnalysisRequest {
    /// Run the request against a prepared analyser.
    ///
    /// Blocking requests stop at the first failing vertex; the ones before
    /// it stay applied.
    pub fn execute<S: BlockedVertexStore>(
        &self,
        analyser: &mut Analyser<S>,
    ) -> Result<AnalysisResponse, AnalysisError> {
        match self {
            Self::Routing { start, end, k } => {
                routing_query(analyser, *start, *end, *k).map(AnalysisResponse::Routes)
            }
            Self::ResourceDistribution { emitters } => {
                resource_distribution_query(analyser, emitters).map(AnalysisResponse::Distribution)
            }
            Self::Block { vertices } => {
                for v in vertices {
                    analyser.block(*v)?;
                }
                Self::blocked_response(analyser)
            }
            Self::Unblock { vertices } => {
                for v in vertices {
                    analyser.unblock(*v)?;
                }
                Self::blocked_response(analyser)
            }
            Self::UnblockAll => {
                analyser.unblock_all()?;
                Self::blocked_response(analyser)
            }
        }
    }

    fn blocked_response<S: BlockedVertexStore>(
        analyser: &Analyser<S>,
    ) -> Result<AnalysisResponse, AnalysisError> {
        Ok(AnalysisResponse::Blocked {
            vertices: analyser.graph()?.blocked_vertices(),
        })
    }
}
