//! Target identity and application mode.
//!
//! A target id has the form `<mode>/<instance>` and is read once from the
//! `cnf/target` marker file of the installation. The mode segment must
//! belong to a fixed set; everything after it is free-form.

use crate::config::CnfPaths;
use crate::error::{ConfigError, ConfigResult};
use serde::Serialize;
use std::fmt;

/// Deployment environment class, derived from the target id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dev,
    Test,
    Stage,
    Prod,
}

impl Mode {
    /// All accepted modes, which also name the directories under
    /// `cnf/targets/` where mode-shared configuration lives.
    pub const ALL: [Mode; 4] = [Mode::Dev, Mode::Test, Mode::Stage, Mode::Prod];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Test => "test",
            Mode::Stage => "stage",
            Mode::Prod => "prod",
        }
    }

    fn from_segment(segment: &str) -> Option<Mode> {
        match segment {
            "dev" => Some(Mode::Dev),
            "test" => Some(Mode::Test),
            "stage" => Some(Mode::Stage),
            "prod" => Some(Mode::Prod),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated target id with its derived mode.
///
/// Immutable once constructed; validation happens before any layer file is
/// read, so a bad mode never touches configuration data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    id: String,
    mode: Mode,
}

impl Target {
    /// Read and validate the target marker of the given installation.
    ///
    /// The first line of the marker file, trimmed, is the target id. A
    /// missing or empty marker is fatal.
    pub fn resolve(paths: &CnfPaths) -> ConfigResult<Self> {
        let marker = paths.target_marker();
        let contents = std::fs::read_to_string(&marker)
            .map_err(|_| ConfigError::MissingTargetMarker {
                path: marker.clone(),
            })?;
        let id = contents.lines().next().unwrap_or("").trim();
        if id.is_empty() {
            return Err(ConfigError::MissingTargetMarker { path: marker });
        }
        Self::from_id(id)
    }

    /// Validate a target id without touching the filesystem.
    pub fn from_id(id: impl Into<String>) -> ConfigResult<Self> {
        let id = id.into();
        let segment = id.split('/').next().unwrap_or("");
        let mode = Mode::from_segment(segment).ok_or_else(|| ConfigError::InvalidMode {
            target: id.clone(),
            mode: segment.to_string(),
        })?;
        Ok(Self { id, mode })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
