//! Override merging into flat and sectioned maps.
//!
//! Layers fold in one at a time, in locator order; a later layer always
//! wins on key conflict. Both maps come from the same traversal, so a key
//! in a section map is also in the flat map with the same final value.

use super::imports::IMPORT_SECTION;
use crate::ini::IniDocument;
use serde::Serialize;
use std::collections::BTreeMap;

/// The merged result of one full layer traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedConfig {
    /// Fully-qualified key → final value.
    pub flat: BTreeMap<String, String>,
    /// Section name → merged key/value map.
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl MergedConfig {
    /// Fold one parsed-and-substituted layer into the accumulator.
    ///
    /// Globals merge first (they precede sections in the file), into the
    /// flat map only; numeric global keys are parser artifacts of unnamed
    /// blocks and are dropped. Sections merge into both maps. Insertion
    /// order within a layer matches file order, so later occurrences win.
    pub fn absorb(&mut self, doc: &IniDocument) {
        for (key, value) in &doc.globals {
            if key.parse::<f64>().is_ok() {
                continue;
            }
            self.flat.insert(key.clone(), value.clone());
        }

        for section in &doc.sections {
            if section.name == IMPORT_SECTION {
                continue;
            }
            let merged = self.sections.entry(section.name.clone()).or_default();
            for (key, value) in &section.entries {
                self.flat.insert(key.clone(), value.clone());
                merged.insert(key.clone(), value.clone());
            }
        }
    }
}
