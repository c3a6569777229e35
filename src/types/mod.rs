//! Core types for the analysis kernel.

pub mod gfid;
pub mod edge;
pub mod vertex;
pub mod path;

pub use gfid::Gfid;
pub use edge::{ConnectionRecord, Direction, GraphEdge};
pub use vertex::Vertex;
pub use path::{Path, PathStep, ShortestPathTree};
