//! Typed errors for configuration resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving the layered configuration.
///
/// Every variant is a deterministic misconfiguration; none of them is
/// retry-eligible. Absent keys, sections, layer files, and import files are
/// normal outcomes and are never reported through this type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No installation root could be discovered.
    #[error(
        "no installation root found (set APPINI_ROOT or run inside a tree containing a cnf/ directory)"
    )]
    RootNotFound,

    /// The target marker file is missing or empty.
    #[error("target marker file {path:?} does not exist")]
    MissingTargetMarker { path: PathBuf },

    /// The target id carries a mode outside the accepted set.
    #[error("target {target:?} does not have a valid application mode (got {mode:?})")]
    InvalidMode { target: String, mode: String },

    /// A named database lacks one of its required connection keys.
    #[error("invalid named database {database:?}: missing key {key:?}")]
    MissingDatabaseKey { database: String, key: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
