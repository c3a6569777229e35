//! In-memory blocked-vertex store.

use std::collections::BTreeSet;

use crate::types::Gfid;
use super::BlockedVertexStore;

/// Error type for in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryError {
    /// Writes were switched off with [`InMemoryBlockedStore::set_read_only`].
    #[error("Store is read-only")]
    ReadOnly,
}

/// In-memory blocked-vertex store.
///
/// Uses a BTreeSet for deterministic load order. Can be switched to
/// read-only to exercise mirror failures.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlockedStore {
    blocked: BTreeSet<Gfid>,
    read_only: bool,
}

impl InMemoryBlockedStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with blocked ids.
    pub fn with_blocked<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Gfid>,
    {
        Self {
            blocked: ids.into_iter().collect(),
            read_only: false,
        }
    }

    /// Reject (or accept again) every subsequent write.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether `id` is recorded as blocked.
    pub fn contains(&self, id: Gfid) -> bool {
        self.blocked.contains(&id)
    }

    /// Number of recorded ids.
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    fn writable(&self) -> Result<(), InMemoryError> {
        if self.read_only {
            Err(InMemoryError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

impl BlockedVertexStore for InMemoryBlockedStore {
    type Error = InMemoryError;

    fn load(&self) -> Result<Vec<Gfid>, Self::Error> {
        Ok(self.blocked.iter().copied().collect())
    }

    fn add(&mut self, id: Gfid) -> Result<(), Self::Error> {
        self.writable()?;
        self.blocked.insert(id);
        Ok(())
    }

    fn remove(&mut self, id: Gfid) -> Result<(), Self::Error> {
        self.writable()?;
        self.blocked.remove(&id);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.writable()?;
        self.blocked.clear();
        Ok(())
    }
}
