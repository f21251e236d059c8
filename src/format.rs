//! Output formatting for the CLI.

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain `key = value` lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render a key/value mapping in the selected format.
pub fn render_map(map: &BTreeMap<String, String>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (key, value) in map {
                out.push_str(key);
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
            out
        }
        OutputFormat::Json => to_json(map),
    }
}

/// Render any serializable value as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_map_text() {
        let map = BTreeMap::from([
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);
        assert_eq!(render_map(&map, OutputFormat::Text), "a = 1\nb = 2\n");
    }

    #[test]
    fn test_render_map_json() {
        let map = BTreeMap::from([("a".to_string(), "1".to_string())]);
        let json: serde_json::Value =
            serde_json::from_str(&render_map(&map, OutputFormat::Json)).unwrap();
        assert_eq!(json["a"], "1");
    }
}
