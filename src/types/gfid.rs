//! Global feature identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global Feature Identifier.
///
/// The stable integer identity of a vertex or connector feature across the
/// whole network. Assigned externally by the network storage layer.
/// Implements `Ord` so maps keyed by it iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gfid(i64);

impl Gfid {
    /// Create a new identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Gfid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Gfid {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Gfid> for i64 {
    fn from(id: Gfid) -> Self {
        id.0
    }
}
