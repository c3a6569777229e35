//! Analyser configuration.
//!
//! A small versioned parameter set with a deterministic hash, so logs and
//! results can be tied to the exact settings an analysis ran under.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_CONFIG_VERSION;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config is not valid JSON for [`AnalyserConfig`].
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// A parameter is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Analyser configuration.
///
/// ## Parameters
///
/// - `max_k`: largest path count `k_shortest_paths` accepts
/// - `restore_blocked_on_prepare`: re-apply the persisted blocked set
///   whenever a graph is prepared
/// - `strict_bootstrap`: fail preparation on a persisted id that is not in
///   the new graph, instead of skipping it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    /// Config version identifier.
    pub version: String,
    /// Upper bound on `k` for K-shortest-paths queries.
    pub max_k: usize,
    /// Re-apply persisted blocks at prepare time.
    pub restore_blocked_on_prepare: bool,
    /// Treat unknown persisted ids as an error.
    pub strict_bootstrap: bool,
}

impl AnalyserConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_k == 0 {
            return Err(ConfigError::Invalid("max_k must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Hash of the config parameters.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self)
    }
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_CONFIG_VERSION.to_string(),
            max_k: 64,
            restore_blocked_on_prepare: true,
            strict_bootstrap: false,
        }
    }
}
