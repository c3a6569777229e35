//! Blocked-vertex persistence backends.
//!
//! The analyser mirrors every successful block/unblock into a store so the
//! durable record never diverges from the in-memory overlay, and reads the
//! store back as the bootstrap list when a graph is prepared.

pub mod memory;
pub mod file;

use crate::types::Gfid;

/// Trait for blocked-vertex persistence backends.
///
/// Implementations must return `load` results in ascending id order.
pub trait BlockedVertexStore {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch every persisted blocked vertex.
    fn load(&self) -> Result<Vec<Gfid>, Self::Error>;

    /// Record a vertex as blocked.
    fn add(&mut self, id: Gfid) -> Result<(), Self::Error>;

    /// Remove a vertex from the blocked record.
    fn remove(&mut self, id: Gfid) -> Result<(), Self::Error>;

    /// Remove every vertex from the blocked record.
    fn clear(&mut self) -> Result<(), Self::Error>;
}

pub use memory::{InMemoryBlockedStore, InMemoryError};
pub use file::{JsonFileBlockedStore, StoreError};
