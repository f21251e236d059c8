//! Full resolution pipeline: target → layers → substitution → merge.

use super::imports::ReplacementTable;
use super::layers::{Layer, locate_layers};
use super::merge::MergedConfig;
use super::paths::CnfPaths;
use crate::error::ConfigResult;
use crate::ini;
use crate::target::{Mode, Target};
use serde::Serialize;
use tracing::{debug, warn};

/// The outcome of one full load, immutable once produced.
///
/// A re-run builds a fresh value from scratch; nothing accumulates across
/// loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub target: Target,
    pub mode: Mode,
    /// Layer files that contributed, in override order.
    pub layers: Vec<Layer>,
    pub merged: MergedConfig,
}

/// Run the whole pipeline against one installation root.
///
/// The target and its mode are validated before any layer file is read, so
/// an invalid mode fails without touching configuration data. Each layer is
/// parsed, rewritten with its own import replacements, and folded into the
/// merged result; an unreadable layer is skipped.
pub fn load(paths: &CnfPaths) -> ConfigResult<ResolvedConfig> {
    let target = Target::resolve(paths)?;
    let mode = target.mode();
    let layers = locate_layers(paths, &target, mode);
    debug!(%target, %mode, layer_count = layers.len(), "resolving configuration");

    let mut merged = MergedConfig::default();
    for layer in &layers {
        let contents = match std::fs::read_to_string(&layer.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(role = %layer.role, path = ?layer.path, %err, "layer file unreadable, skipping");
                continue;
            }
        };
        let mut doc = ini::parse(&contents);
        let table = ReplacementTable::extract(&doc, paths.root());
        table.apply(&mut doc);
        merged.absorb(&doc);
    }

    Ok(ResolvedConfig {
        target,
        mode,
        layers,
        merged,
    })
}
