//! Thin directory and diagnostic helpers over the resolved configuration.
//!
//! Nothing here carries resolution logic; every helper is a stateless
//! convenience wrapper around the store or the path layout.

use crate::config::{CnfPaths, ConfigStore};
use crate::error::ConfigResult;
use crate::target::{Mode, Target};
use std::path::PathBuf;

/// Debug level assumed when the configuration does not set one.
pub const DEFAULT_DEBUG_MODE: &str = "6";

/// Per-target diagnostic ini, relative to a layer's config directory.
const RUNTIME_INI: &str = "runtime.d/runtime.ini";

/// The installation's configured user-data directory.
pub fn user_data_dir(store: &ConfigStore) -> ConfigResult<Option<PathBuf>> {
    dir_key(store, "symfony.dir.usrdata")
}

/// The installation's configured backup directory.
pub fn backup_dir(store: &ConfigStore) -> ConfigResult<Option<PathBuf>> {
    dir_key(store, "symfony.dir.backup")
}

/// The installation's configured tmp directory.
pub fn tmp_dir(store: &ConfigStore) -> ConfigResult<Option<PathBuf>> {
    dir_key(store, "symfony.dir.tmp")
}

/// The installation's configured log directory.
pub fn log_dir(store: &ConfigStore) -> ConfigResult<Option<PathBuf>> {
    dir_key(store, "symfony.dir.logs")
}

/// The configured debug mode, defaulting to [`DEFAULT_DEBUG_MODE`].
pub fn debug_mode(store: &ConfigStore) -> ConfigResult<String> {
    store.get_one_or("symfony.debug", DEFAULT_DEBUG_MODE)
}

fn dir_key(store: &ConfigStore, key: &str) -> ConfigResult<Option<PathBuf>> {
    Ok(store.get_one(key)?.map(PathBuf::from))
}

/// Locate the per-target `runtime.d/runtime.ini` diagnostic file.
///
/// Without `use_defaults` only the target directory is consulted. With it,
/// the target → mode-shared → shared chain is searched first-found-wins.
/// Absence is a normal outcome.
pub fn runtime_ini_path(
    paths: &CnfPaths,
    target: &Target,
    mode: Mode,
    use_defaults: bool,
) -> Option<PathBuf> {
    let target_path = paths.target_dir(target).join(RUNTIME_INI);
    if !use_defaults {
        return target_path.is_file().then_some(target_path);
    }

    [
        target_path,
        paths.mode_shared_dir(mode).join(RUNTIME_INI),
        paths.shared_dir().join(RUNTIME_INI),
    ]
    .into_iter()
    .find(|path| path.is_file())
}
