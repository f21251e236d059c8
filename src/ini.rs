//! Section-aware ini parsing.
//!
//! Parses the minimal dialect the layer files use: `[section]` headers,
//! `key = value` lines, and full-line `;` or `#` comments. Entry order is
//! preserved so that later duplicate keys win during the merge. Anything
//! outside the dialect is skipped rather than rejected; syntax validation
//! beyond what the merge needs is deliberately out of scope.

/// One parsed ini file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    /// Entries that appear before the first `[section]` header.
    pub globals: Vec<(String, String)>,
    /// Sections in file order; a name may occur more than once.
    pub sections: Vec<IniSection>,
}

/// A named group of key/value entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl IniDocument {
    /// First section with the given name, if any.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Whether the document holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.sections.iter().all(|s| s.entries.is_empty())
    }
}

/// Parse ini text into a document, respecting sections.
pub fn parse(input: &str) -> IniDocument {
    let mut doc = IniDocument::default();
    let mut current: Option<IniSection> = None;

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            if let Some(section) = current.take() {
                doc.sections.push(section);
            }
            current = Some(IniSection {
                name: line[1..line.len() - 1].trim().to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_string();
        if key.is_empty() {
            continue;
        }
        let value = unquote(value.trim()).to_string();

        match current.as_mut() {
            Some(section) => section.entries.push((key, value)),
            None => doc.globals.push((key, value)),
        }
    }

    if let Some(section) = current.take() {
        doc.sections.push(section);
    }

    doc
}

/// Strip one matching pair of surrounding quotes.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
