//! Blocking overlay.
//!
//! A per-vertex flag marking vertices unusable as intermediate or
//! destination hops. Traversals consult it only when deciding whether to
//! expand into a neighbour, so a blocked start or seed vertex is still
//! processed.
//!
//! `block` and `unblock` reject redundant requests instead of treating
//! them as no-ops, and leave state unchanged on error.

use crate::error::GraphError;
use crate::types::Gfid;

use super::Graph;

impl Graph {
    /// Mark a vertex as blocked.
    pub fn block(&mut self, id: Gfid) -> Result<(), GraphError> {
        self.check_block(id)?;
        if let Some(vertex) = self.vertices.get_mut(&id) {
            vertex.blocked = true;
        }
        Ok(())
    }

    /// Clear a vertex's blocked flag.
    pub fn unblock(&mut self, id: Gfid) -> Result<(), GraphError> {
        self.check_unblock(id)?;
        if let Some(vertex) = self.vertices.get_mut(&id) {
            vertex.blocked = false;
        }
        Ok(())
    }

    /// Whether the vertex is blocked. Unknown ids are not blocked.
    pub fn is_blocked(&self, id: Gfid) -> bool {
        self.vertices.get(&id).map(|v| v.blocked).unwrap_or(false)
    }

    /// Clear every vertex's blocked flag.
    pub fn unblock_all(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.blocked = false;
        }
    }

    /// Blocked vertices ordered by id.
    pub fn blocked_vertices(&self) -> Vec<Gfid> {
        self.vertices
            .iter()
            .filter(|(_, v)| v.blocked)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Validate a block request without applying it.
    pub fn check_block(&self, id: Gfid) -> Result<(), GraphError> {
        match self.vertices.get(&id) {
            None => Err(GraphError::VertexNotFound(id)),
            Some(v) if v.blocked => Err(GraphError::AlreadyBlocked(id)),
            Some(_) => Ok(()),
        }
    }

    /// Validate an unblock request without applying it.
    pub fn check_unblock(&self, id: Gfid) -> Result<(), GraphError> {
        match self.vertices.get(&id) {
            None => Err(GraphError::VertexNotFound(id)),
            Some(v) if !v.blocked => Err(GraphError::NotBlocked(id)),
            Some(_) => Ok(()),
        }
    }
}
