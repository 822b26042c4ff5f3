//! The settings document: a JSON tree queried by dot-separated paths.

use crate::constants::{PLACEHOLDER_DATA_PREFIX, PLACEHOLDER_SECTION, SECRET_SENTINEL};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Shape the `placeholder` section has to satisfy.
#[derive(Debug, Deserialize)]
struct PlaceholderSection {
    #[allow(dead_code)]
    data: Map<String, Value>,
    #[serde(default)]
    suffixes: Vec<String>,
}

/// Read-only settings tree rooted at an object with a `placeholder` section.
#[derive(Debug, Clone)]
pub struct SettingsDocument {
    root: Map<String, Value>,
    suffixes: Vec<String>,
}

impl SettingsDocument {
    /// Parses a settings body.
    ///
    /// Fails with `SettingsParse` on malformed JSON or a malformed `placeholder`
    /// section, `SettingsRootNotObject` when the root is not an object, and
    /// `MissingPlaceholderSection` when the section is absent.
    pub fn parse(text: &str) -> Result<Self> {
        let root = match serde_json::from_str::<Value>(text)? {
            Value::Object(map) => map,
            other => {
                let found = json_kind(&other);
                log::error!("Settings document root must be an object, found {found}");
                return Err(Error::SettingsRootNotObject { found });
            }
        };
        let section = root
            .get(PLACEHOLDER_SECTION)
            .ok_or(Error::MissingPlaceholderSection)?;
        let PlaceholderSection { suffixes, .. } =
            PlaceholderSection::deserialize(section)?;

        Ok(Self { root, suffixes })
    }

    /// Looks up a dot-separated path, e.g. `placeholder.data.server.port`.
    ///
    /// Every segment but the last must resolve to an object. The leaf is
    /// returned as-is, whatever its type.
    pub fn get_by_path(&self, path: &str) -> Result<&Value> {
        let keys: Vec<&str> = path.split('.').collect();
        let mut current = &self.root;

        for (i, key) in keys.iter().enumerate() {
            let Some(element) = current.get(*key) else {
                log::error!("Failed to retrieve path [{path}]: not found in current.");
                return Err(Error::PathNotFound { path: path.to_string() });
            };

            if i == keys.len() - 1 {
                return Ok(element);
            }

            match element {
                Value::Object(map) => current = map,
                _ => {
                    log::error!(
                        "Invalid structure for path [{path}]: expected an object at key [{key}]"
                    );
                    return Err(Error::InvalidStructure {
                        segment: key.to_string(),
                        path: path.to_string(),
                    });
                }
            }
        }

        // `split` always yields at least one segment.
        Err(Error::PathNotFound { path: path.to_string() })
    }

    /// Folder-name suffixes used to select files for substitution.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Placeholder data paths (relative to `placeholder.data`) whose stored
    /// value is the secret sentinel, sorted.
    pub fn secret_paths(&self) -> Vec<String> {
        let mut found = Vec::new();
        if let Some(Value::Object(data)) = self
            .root
            .get(PLACEHOLDER_SECTION)
            .and_then(|section| section.get("data"))
        {
            collect_secret_paths(data, "", &mut found);
        }
        found.sort();
        found
    }

    /// Full lookup path for a placeholder path.
    pub fn data_path(path: &str) -> String {
        format!("{PLACEHOLDER_DATA_PREFIX}{path}")
    }
}

/// Human-readable name of a JSON node type.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn collect_secret_paths(map: &Map<String, Value>, prefix: &str, found: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        match value {
            Value::Object(child) => collect_secret_paths(child, &path, found),
            Value::String(s) if s == SECRET_SENTINEL => found.push(path),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "placeholder": {
            "data": {
                "server": { "name": "Alpha", "port": 25565 },
                "proxy": { "secret": "$(velocity.secret)" },
                "motd": "hello"
            },
            "suffixes": ["-a", "-b"]
        }
    }"#;

    #[test]
    fn parses_and_reads_leaves() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get_by_path("placeholder.data.server.name").unwrap(), &json!("Alpha"));
        assert_eq!(doc.get_by_path("placeholder.data.server.port").unwrap(), &json!(25565));
        assert_eq!(doc.suffixes(), &["-a".to_string(), "-b".to_string()]);
    }

    #[test]
    fn returns_non_scalar_leaf_verbatim() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        let server = doc.get_by_path("placeholder.data.server").unwrap();
        assert_eq!(server, &json!({ "name": "Alpha", "port": 25565 }));
    }

    #[test]
    fn repeated_lookups_are_identical() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        let first = doc.get_by_path("placeholder.data.motd").unwrap().clone();
        for _ in 0..3 {
            assert_eq!(doc.get_by_path("placeholder.data.motd").unwrap(), &first);
        }
    }

    #[test]
    fn missing_key_is_not_found() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        match doc.get_by_path("placeholder.data.server.missing") {
            Err(Error::PathNotFound { path }) => {
                assert_eq!(path, "placeholder.data.server.missing")
            }
            other => panic!("Expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn walking_through_scalar_is_structure_error() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        match doc.get_by_path("placeholder.data.motd.inner") {
            Err(Error::InvalidStructure { segment, path }) => {
                assert_eq!(segment, "motd");
                assert_eq!(path, "placeholder.data.motd.inner");
            }
            other => panic!("Expected InvalidStructure, got {other:?}"),
        }
    }

    #[test]
    fn missing_placeholder_section_is_rejected() {
        let result = SettingsDocument::parse(r#"{"other": {}}"#);
        assert!(matches!(result, Err(Error::MissingPlaceholderSection)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result = SettingsDocument::parse("{ not json");
        assert!(matches!(result, Err(Error::SettingsParse(_))));
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(matches!(
            SettingsDocument::parse("[1,2]"),
            Err(Error::SettingsRootNotObject { found: "an array" })
        ));
        assert!(matches!(
            SettingsDocument::parse("42"),
            Err(Error::SettingsRootNotObject { found: "a number" })
        ));
    }

    #[test]
    fn suffixes_default_to_empty() {
        let doc = SettingsDocument::parse(r#"{"placeholder": {"data": {}}}"#).unwrap();
        assert!(doc.suffixes().is_empty());
    }

    #[test]
    fn lists_sentinel_paths() {
        let doc = SettingsDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.secret_paths(), vec!["proxy.secret".to_string()]);
    }
}
