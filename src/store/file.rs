//! JSON-file blocked-vertex store.
//!
//! Persists the blocked set as a sorted JSON array of GFIDs. Every
//! mutation rewrites the file through a temporary sibling and a rename,
//! and the cached set only changes once the write has succeeded.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Gfid;
use super::BlockedVertexStore;

/// Error type for the JSON-file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error: {source} (path: {path})")]
    Io {
        /// Underlying error.
        source: std::io::Error,
        /// File being accessed.
        path: PathBuf,
    },
    /// The file does not hold a JSON array of ids.
    #[error("Malformed blocked-vertex file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blocked-vertex store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBlockedStore {
    path: PathBuf,
    blocked: BTreeSet<Gfid>,
}

impl JsonFileBlockedStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let blocked = if path.exists() {
            let bytes = fs::read(&path).map_err(|source| StoreError::Io {
                source,
                path: path.clone(),
            })?;
            serde_json::from_slice::<BTreeSet<Gfid>>(&bytes)?
        } else {
            BTreeSet::new()
        };

        tracing::debug!(
            path = %path.display(),
            blocked = blocked.len(),
            "Opened blocked-vertex store"
        );
        Ok(Self { path, blocked })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&mut self, next: BTreeSet<Gfid>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&next)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, bytes).map_err(|source| StoreError::Io {
            source,
            path: tmp.clone(),
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            source,
            path: self.path.clone(),
        })?;

        self.blocked = next;
        Ok(())
    }
}

impl BlockedVertexStore for JsonFileBlockedStore {
    type Error = StoreError;

    fn load(&self) -> Result<Vec<Gfid>, Self::Error> {
        Ok(self.blocked.iter().copied().collect())
    }

    fn add(&mut self, id: Gfid) -> Result<(), Self::Error> {
        let mut next = self.blocked.clone();
        next.insert(id);
        self.persist(next)
    }

    fn remove(&mut self, id: Gfid) -> Result<(), Self::Error> {
        let mut next = self.blocked.clone();
        next.remove(&id);
        self.persist(next)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.persist(BTreeSet::new())
    }
}
