//! Lazily-initialized configuration store and lookup API.

use super::loader::{self, ResolvedConfig};
use super::paths::CnfPaths;
use crate::error::ConfigResult;
use crate::target::{Mode, Target};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Namespace every flat key lives under; lookups lacking it have it
/// prepended before the lookup runs.
pub const KEY_PREFIX: &str = "symfony.";

/// Process-lifetime store over one installation root.
///
/// The first lookup runs the full load exactly once, even under concurrent
/// first access from several threads; the outcome (success or failure) is
/// cached and never mutated for the life of the store. Reads after
/// initialization need no locking.
#[derive(Debug)]
pub struct ConfigStore {
    paths: CnfPaths,
    resolved: OnceLock<ConfigResult<ResolvedConfig>>,
}

impl ConfigStore {
    /// Create a store over an explicit installation.
    pub fn new(paths: CnfPaths) -> Self {
        Self {
            paths,
            resolved: OnceLock::new(),
        }
    }

    /// Create a store over the discovered installation root.
    pub fn discover() -> ConfigResult<Self> {
        Ok(Self::new(CnfPaths::discover()?))
    }

    pub fn paths(&self) -> &CnfPaths {
        &self.paths
    }

    /// The resolved snapshot, loading it on first call.
    pub fn resolved(&self) -> ConfigResult<&ResolvedConfig> {
        self.resolved
            .get_or_init(|| loader::load(&self.paths))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The active target.
    pub fn target(&self) -> ConfigResult<&Target> {
        Ok(&self.resolved()?.target)
    }

    /// The active target's application mode.
    pub fn mode(&self) -> ConfigResult<Mode> {
        Ok(self.resolved()?.mode)
    }

    /// Look up a single namespaced key; absence is not an error.
    pub fn get_one(&self, key: &str) -> ConfigResult<Option<&str>> {
        let key = qualify(key);
        Ok(self
            .resolved()?
            .merged
            .flat
            .get(key.as_ref())
            .map(String::as_str))
    }

    /// Look up several keys; the result holds only the keys that resolved.
    ///
    /// With `shorten` set, each returned key is cut down to the segment
    /// after its final `.`.
    pub fn get_many(&self, keys: &[&str], shorten: bool) -> ConfigResult<BTreeMap<String, String>> {
        let flat = &self.resolved()?.merged.flat;
        let mut out = BTreeMap::new();
        for key in keys {
            let qualified = qualify(key);
            if let Some(value) = flat.get(qualified.as_ref()) {
                let name = if shorten {
                    shorten_key(&qualified).to_string()
                } else {
                    qualified.into_owned()
                };
                out.insert(name, value.clone());
            }
        }
        Ok(out)
    }

    /// Single-key lookup with a default for the absent case.
    pub fn get_one_or(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_one(key)?
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string()))
    }

    /// Multi-key lookup yielding `defaults` when no key resolved at all.
    pub fn get_many_or(
        &self,
        keys: &[&str],
        shorten: bool,
        defaults: BTreeMap<String, String>,
    ) -> ConfigResult<BTreeMap<String, String>> {
        let found = self.get_many(keys, shorten)?;
        Ok(if found.is_empty() { defaults } else { found })
    }

    /// A whole merged section, or `None` when no layer declared it.
    pub fn section(&self, name: &str) -> ConfigResult<Option<&BTreeMap<String, String>>> {
        Ok(self.resolved()?.merged.sections.get(name))
    }
}

fn qualify(key: &str) -> Cow<'_, str> {
    if key.starts_with(KEY_PREFIX) {
        Cow::Borrowed(key)
    } else {
        Cow::Owned(format!("{KEY_PREFIX}{key}"))
    }
}

fn shorten_key(key: &str) -> &str {
    match key.rfind('.') {
        Some(pos) => &key[pos + 1..],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layers::LAYER_FILE;
    use crate::error::ConfigError;
    use tempfile::TempDir;

    fn store_with(temp: &TempDir, target_id: &str, shared_ini: &str) -> ConfigStore {
        let paths = CnfPaths::with_root(temp.path());
        std::fs::create_dir_all(paths.shared_dir()).unwrap();
        std::fs::write(paths.target_marker(), target_id).unwrap();
        std::fs::write(paths.shared_dir().join(LAYER_FILE), shared_ini).unwrap();
        ConfigStore::new(paths)
    }

    #[test]
    fn test_prefix_auto_prepended() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "prod/web1", "[app]\nsymfony.debug = 2\n");

        assert_eq!(store.get_one("symfony.debug").unwrap(), Some("2"));
        assert_eq!(store.get_one("debug").unwrap(), Some("2"));
    }

    #[test]
    fn test_absent_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "prod/web1", "");

        assert_eq!(store.get_one("symfony.nonexistent").unwrap(), None);
        assert_eq!(
            store.get_one_or("symfony.nonexistent", "fallback").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_get_many_keeps_only_resolved() {
        let temp = TempDir::new().unwrap();
        let store = store_with(
            &temp,
            "prod/web1",
            "[app]\nsymfony.dir.tmp = /tmp\nsymfony.dir.logs = /var/log\n",
        );

        let found = store
            .get_many(&["symfony.dir.tmp", "symfony.dir.logs", "symfony.missing"], false)
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["symfony.dir.tmp"], "/tmp");
    }

    #[test]
    fn test_get_many_shortened_keys() {
        let temp = TempDir::new().unwrap();
        let store = store_with(
            &temp,
            "prod/web1",
            "[app]\nsymfony.dir.tmp = /tmp\nsymfony.dir.logs = /var/log\n",
        );

        let found = store
            .get_many(&["symfony.dir.tmp", "symfony.dir.logs"], true)
            .unwrap();
        assert_eq!(found["tmp"], "/tmp");
        assert_eq!(found["logs"], "/var/log");
    }

    #[test]
    fn test_get_many_or_empty_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "prod/web1", "");

        let defaults = BTreeMap::from([("k".to_string(), "v".to_string())]);
        let out = store
            .get_many_or(&["symfony.a", "symfony.b"], false, defaults.clone())
            .unwrap();
        assert_eq!(out, defaults);
    }

    #[test]
    fn test_section_lookup() {
        let temp = TempDir::new().unwrap();
        let store = store_with(
            &temp,
            "prod/web1",
            "[database]\nsymfony.db.master.host = db1\n[app]\nsymfony.debug = 1\n",
        );

        let db = store.section("database").unwrap().unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db["symfony.db.master.host"], "db1");
        assert!(store.section("cache").unwrap().is_none());
    }

    #[test]
    fn test_failed_load_is_cached() {
        let temp = TempDir::new().unwrap();
        let paths = CnfPaths::with_root(temp.path());
        let store = ConfigStore::new(paths);

        let first = store.get_one("symfony.debug").unwrap_err();
        let second = store.mode().unwrap_err();
        assert!(matches!(first, ConfigError::MissingTargetMarker { .. }));
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_and_mode_accessors() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "stage/api1", "");

        assert_eq!(store.target().unwrap().id(), "stage/api1");
        assert_eq!(store.mode().unwrap(), Mode::Stage);
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "prod/web1", "[app]\nsymfony.debug = 2\n");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(store.get_one("debug").unwrap(), Some("2"));
                });
            }
        });

        // all threads observed the same snapshot
        let resolved = store.resolved().unwrap();
        assert_eq!(resolved.merged.flat["symfony.debug"], "2");
    }
}
