//! Layer roles and candidate file location.

use super::paths::CnfPaths;
use crate::target::{Mode, Target};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// File name every layer uses.
pub const LAYER_FILE: &str = "app.ini";

/// Role of one configuration layer.
///
/// Declaration order is override order: a later role wins on key conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerRole {
    /// Shared by all targets.
    Shared,
    /// Shared by targets with the same application mode.
    ModeShared,
    /// Specific to the current target.
    Target,
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerRole::Shared => write!(f, "shared"),
            LayerRole::ModeShared => write!(f, "mode-shared"),
            LayerRole::Target => write!(f, "target"),
        }
    }
}

/// One configuration file contributing to the merged result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    pub role: LayerRole,
    pub path: PathBuf,
}

/// Compute the layer chain for a target, filtered to existing files.
///
/// The output preserves the override order shared → mode-shared → target.
/// An absent candidate is a normal outcome, not an error.
pub fn locate_layers(paths: &CnfPaths, target: &Target, mode: Mode) -> Vec<Layer> {
    let candidates = [
        (LayerRole::Shared, paths.shared_dir().join(LAYER_FILE)),
        (
            LayerRole::ModeShared,
            paths.mode_shared_dir(mode).join(LAYER_FILE),
        ),
        (LayerRole::Target, paths.target_dir(target).join(LAYER_FILE)),
    ];

    candidates
        .into_iter()
        .filter_map(|(role, path)| {
            if path.is_file() {
                Some(Layer { role, path })
            } else {
                debug!(%role, ?path, "layer file absent, skipping");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture(temp: &TempDir) -> (CnfPaths, Target) {
        let paths = CnfPaths::with_root(temp.path());
        let target = Target::from_id("prod/web1").unwrap();
        (paths, target)
    }

    #[test]
    fn test_all_layers_present_in_order() {
        let temp = TempDir::new().unwrap();
        let (paths, target) = fixture(&temp);

        for dir in [
            paths.shared_dir(),
            paths.mode_shared_dir(Mode::Prod),
            paths.target_dir(&target),
        ] {
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(LAYER_FILE), "").unwrap();
        }

        let layers = locate_layers(&paths, &target, Mode::Prod);
        let roles: Vec<_> = layers.iter().map(|l| l.role).collect();
        assert_eq!(
            roles,
            vec![LayerRole::Shared, LayerRole::ModeShared, LayerRole::Target]
        );
    }

    #[test]
    fn test_missing_layers_are_dropped() {
        let temp = TempDir::new().unwrap();
        let (paths, target) = fixture(&temp);

        let dir = paths.mode_shared_dir(Mode::Prod);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(LAYER_FILE), "").unwrap();

        let layers = locate_layers(&paths, &target, Mode::Prod);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].role, LayerRole::ModeShared);
    }

    #[test]
    fn test_no_layers_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let (paths, target) = fixture(&temp);
        assert!(locate_layers(&paths, &target, Mode::Prod).is_empty());
    }

    #[test]
    fn test_role_override_ranking() {
        assert!(LayerRole::Shared < LayerRole::ModeShared);
        assert!(LayerRole::ModeShared < LayerRole::Target);
    }
}
