//! Installation root discovery and path composition.
//!
//! Every path in the system is composed from a single installation root:
//! the configuration tree lives under `<root>/cnf/` and the webroot under
//! `<root>/web/`.

use crate::error::{ConfigError, ConfigResult};
use crate::target::{Mode, Target};
use std::path::{Path, PathBuf};

/// Environment variable that overrides installation root discovery.
pub const ROOT_ENV: &str = "APPINI_ROOT";

/// Well-known locations inside one installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnfPaths {
    root: PathBuf,
}

impl CnfPaths {
    /// Use an explicit installation root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover the installation root.
    ///
    /// `APPINI_ROOT` wins when set. Otherwise the nearest ancestor of the
    /// working directory, then of the executable's directory, containing a
    /// `cnf/` directory is used.
    pub fn discover() -> ConfigResult<Self> {
        if let Ok(root) = std::env::var(ROOT_ENV) {
            return Ok(Self::with_root(root));
        }

        if let Ok(cwd) = std::env::current_dir()
            && let Some(root) = find_root_from(&cwd)
        {
            return Ok(Self::with_root(root));
        }

        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
            && let Some(root) = find_root_from(dir)
        {
            return Ok(Self::with_root(root));
        }

        Err(ConfigError::RootNotFound)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/cnf`
    pub fn cnf_dir(&self) -> PathBuf {
        self.root.join("cnf")
    }

    /// `<root>/cnf/target` — the marker file naming the active target.
    pub fn target_marker(&self) -> PathBuf {
        self.cnf_dir().join("target")
    }

    /// `<root>/cnf/shared` — configuration shared by all targets.
    pub fn shared_dir(&self) -> PathBuf {
        self.cnf_dir().join("shared")
    }

    /// `<root>/cnf/targets`
    pub fn targets_dir(&self) -> PathBuf {
        self.cnf_dir().join("targets")
    }

    /// `<root>/cnf/targets/<target>` — the current target's own directory.
    pub fn target_dir(&self, target: &Target) -> PathBuf {
        self.targets_dir().join(target.id())
    }

    /// `<root>/cnf/targets/<mode>/shared` — shared between targets of one mode.
    pub fn mode_shared_dir(&self, mode: Mode) -> PathBuf {
        self.targets_dir().join(mode.as_str()).join("shared")
    }

    /// `<root>/web`
    pub fn webroot_dir(&self) -> PathBuf {
        self.root.join("web")
    }
}

fn find_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("cnf").is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_composition() {
        let paths = CnfPaths::with_root("/srv/app");
        let target = Target::from_id("prod/web1").unwrap();

        assert_eq!(paths.cnf_dir(), PathBuf::from("/srv/app/cnf"));
        assert_eq!(paths.target_marker(), PathBuf::from("/srv/app/cnf/target"));
        assert_eq!(paths.shared_dir(), PathBuf::from("/srv/app/cnf/shared"));
        assert_eq!(
            paths.target_dir(&target),
            PathBuf::from("/srv/app/cnf/targets/prod/web1")
        );
        assert_eq!(
            paths.mode_shared_dir(Mode::Prod),
            PathBuf::from("/srv/app/cnf/targets/prod/shared")
        );
        assert_eq!(paths.webroot_dir(), PathBuf::from("/srv/app/web"));
    }

    #[test]
    fn test_find_root_walks_up() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("install");
        let nested = root.join("src/deep/module");
        std::fs::create_dir_all(root.join("cnf")).unwrap();
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root_from(&nested), Some(root));
    }

    #[test]
    fn test_find_root_absent() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find_root_from(temp.path()), None);
    }
}
