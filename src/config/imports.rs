//! Import extraction and `%key%` substitution.
//!
//! A layer may carry a reserved `[import]` section whose values name ini
//! files relative to the installation root. Their flattened key/value pairs
//! become that layer's replacement table, used to rewrite `%key%`
//! placeholders in the layer's other values. The table never leaks into a
//! different layer.

use crate::ini::{self, IniDocument};
use std::path::Path;
use tracing::{debug, warn};

/// Reserved section whose entries point at substitution source files.
pub const IMPORT_SECTION: &str = "import";

/// Ordered placeholder table scoped to a single layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<(String, String)>,
}

impl ReplacementTable {
    /// Build the table from a layer's `[import]` section.
    ///
    /// Each value is a path relative to the installation root. Resolvable
    /// files are parsed and flattened in order, later files overwriting
    /// earlier keys; an unreadable import contributes nothing. The table is
    /// complete before any substitution runs.
    pub fn extract(doc: &IniDocument, root: &Path) -> Self {
        let mut table = Self::default();
        let Some(imports) = doc.section(IMPORT_SECTION) else {
            return table;
        };

        for (name, relative) in &imports.entries {
            let path = root.join(relative);
            let contents = match std::fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(_) => {
                    warn!(import = %name, ?path, "import file unreadable, skipping");
                    continue;
                }
            };
            let imported = ini::parse(&contents);
            debug!(import = %name, ?path, "import file loaded");
            for (key, value) in flatten(&imported) {
                table.insert(key, value);
            }
        }

        table
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every value of every non-import section and every global.
    ///
    /// Substitution is literal substring replacement of `%key%`; an empty
    /// table is a no-op.
    pub fn apply(&self, doc: &mut IniDocument) {
        if self.is_empty() {
            return;
        }

        for (_, value) in &mut doc.globals {
            *value = self.rewrite(value);
        }
        for section in &mut doc.sections {
            if section.name == IMPORT_SECTION {
                continue;
            }
            for (_, value) in &mut section.entries {
                *value = self.rewrite(value);
            }
        }
    }

    fn rewrite(&self, value: &str) -> String {
        let mut out = value.to_string();
        for (key, replacement) in &self.entries {
            let placeholder = format!("%{key}%");
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, replacement);
            }
        }
        out
    }

    fn insert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

/// Flatten a document into bare key/value pairs: globals first, then every
/// section's entries without their section qualifier.
fn flatten(doc: &IniDocument) -> Vec<(String, String)> {
    let mut pairs = doc.globals.clone();
    for section in &doc.sections {
        pairs.extend(section.entries.iter().cloned());
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_from_import_section() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("vars.ini"), "bar = 42\n").unwrap();

        let doc = ini::parse("[import]\nfoo = vars.ini\n");
        let table = ReplacementTable::extract(&doc, temp.path());
        assert!(!table.is_empty());
        assert_eq!(table.rewrite("x = %bar%"), "x = 42");
    }

    #[test]
    fn test_missing_import_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let doc = ini::parse("[import]\nfoo = nope.ini\n");
        let table = ReplacementTable::extract(&doc, temp.path());
        assert!(table.is_empty());
    }

    #[test]
    fn test_later_import_overwrites_earlier_key() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.ini"), "k = first\n").unwrap();
        std::fs::write(temp.path().join("b.ini"), "k = second\n").unwrap();

        let doc = ini::parse("[import]\none = a.ini\ntwo = b.ini\n");
        let table = ReplacementTable::extract(&doc, temp.path());
        assert_eq!(table.rewrite("%k%"), "second");
    }

    #[test]
    fn test_sectioned_import_values_flatten() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("vars.ini"),
            "top = 1\n[group]\ninner = 2\n",
        )
        .unwrap();

        let doc = ini::parse("[import]\nvars = vars.ini\n");
        let table = ReplacementTable::extract(&doc, temp.path());
        assert_eq!(table.rewrite("%top%/%inner%"), "1/2");
    }

    #[test]
    fn test_apply_rewrites_all_but_import() {
        let mut doc = ini::parse(
            "g = %v%\n[import]\nfiles = x.ini\n[section]\nkey = pre %v% post\n",
        );
        let mut table = ReplacementTable::default();
        table.insert("v".into(), "value".into());

        table.apply(&mut doc);
        assert_eq!(doc.globals[0].1, "value");
        assert_eq!(doc.section("section").unwrap().entries[0].1, "pre value post");
        // the import section itself is left untouched
        assert_eq!(doc.section(IMPORT_SECTION).unwrap().entries[0].1, "x.ini");
    }

    #[test]
    fn test_empty_table_is_noop() {
        let mut doc = ini::parse("[s]\nkey = %unresolved%\n");
        ReplacementTable::default().apply(&mut doc);
        assert_eq!(doc.section("s").unwrap().entries[0].1, "%unresolved%");
    }

    #[test]
    fn test_unknown_placeholder_passes_through() {
        let mut table = ReplacementTable::default();
        table.insert("known".into(), "v".into());
        assert_eq!(table.rewrite("%known% %unknown%"), "v %unknown%");
    }
}
