//! Payload file loading.
//!
//! Payloads are authored as JSON or YAML; the wire needs JSON. `.json` files
//! pass through untouched, `.yaml`/`.yml` files are parsed and re-serialized
//! as JSON with every mapping key converted to a string.

use std::fs;
use std::path::Path;

use serde_json::{Map, Number};
use serde_yaml::Value as YamlValue;
use serde_json::Value as JsonValue;

use crate::error::LoadError;

/// Payload formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Detects the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<FileFormat> {
        match ext {
            "json" => Some(FileFormat::Json),
            "yaml" | "yml" => Some(FileFormat::Yaml),
            _ => None,
        }
    }
}

/// Reads a payload file and returns JSON bytes.
///
/// The file is read before its extension is checked, so a missing file
/// reports an I/O error even when the extension is unsupported.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let format = FileFormat::from_extension(ext).ok_or_else(|| LoadError::UnsupportedFormat {
        extension: if ext.is_empty() { String::new() } else { format!(".{ext}") },
    })?;
    tracing::debug!(path = %path.display(), ?format, len = data.len(), "loaded payload file");

    match format {
        FileFormat::Json => Ok(data),
        FileFormat::Yaml => {
            let yaml_error = |source: serde_yaml::Error| LoadError::Yaml {
                path: path.to_path_buf(),
                source,
            };
            let mut doc: YamlValue = serde_yaml::from_slice(&data).map_err(yaml_error)?;
            doc.apply_merge().map_err(yaml_error)?;
            let json = normalize_yaml(doc)?;
            Ok(serde_json::to_vec(&json)?)
        }
    }
}

/// Converts a YAML document into a JSON value.
///
/// Merge keys (`<<`) are not resolved here; [`load_file`] applies them
/// before converting.
///
/// Mapping keys become strings: strings as-is, numbers and booleans by their
/// textual form, null as "null". Sequence or mapping keys are rejected.
/// Tags are dropped in favor of the tagged value.
pub fn normalize_yaml(value: YamlValue) -> Result<JsonValue, LoadError> {
    Ok(match value {
        YamlValue::Null => JsonValue::Null,
        YamlValue::Bool(b) => JsonValue::Bool(b),
        YamlValue::Number(n) => JsonValue::Number(yaml_number(&n)?),
        YamlValue::String(s) => JsonValue::String(s),
        YamlValue::Sequence(seq) => {
            JsonValue::Array(seq.into_iter().map(normalize_yaml).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (k, v) in mapping {
                map.insert(mapping_key(k)?, normalize_yaml(v)?);
            }
            JsonValue::Object(map)
        }
        YamlValue::Tagged(tagged) => normalize_yaml(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Number, LoadError> {
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    Number::from_f64(f).ok_or(LoadError::NonFiniteNumber { value: f })
}

fn mapping_key(key: YamlValue) -> Result<String, LoadError> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Tagged(tagged) => mapping_key(tagged.value),
        other @ (YamlValue::Sequence(_) | YamlValue::Mapping(_)) => Err(LoadError::UnsupportedKey {
            key: serde_yaml::to_string(&other)
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|_| format!("{other:?}")),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load_json(file: &tempfile::NamedTempFile) -> JsonValue {
        serde_json::from_slice(&load_file(file.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_json_passthrough() {
        let raw = "  {\"admin-state\": \"enable\"}\n";
        let file = write_temp(".json", raw);
        assert_eq!(load_file(file.path()).unwrap(), raw.as_bytes());

        // Not validated at this layer.
        let file = write_temp(".json", "not json");
        assert_eq!(load_file(file.path()).unwrap(), b"not json");
    }

    #[test]
    fn test_yaml_non_string_keys() {
        let file = write_temp(".yaml", "{1: \"a\", 2: \"b\"}");
        assert_eq!(load_json(&file), serde_json::json!({"1": "a", "2": "b"}));
    }

    #[test]
    fn test_yaml_nested() {
        let yaml = "\
admin-state: enable
network-instance: mgmt
server:
  - address: 10.0.0.1
    iburst: true
  - address: 10.0.0.2
    weight: 1.5
    tags:
      true: yes
      ~: none
";
        let file = write_temp(".yml", yaml);
        assert_eq!(
            load_json(&file),
            serde_json::json!({
                "admin-state": "enable",
                "network-instance": "mgmt",
                "server": [
                    {"address": "10.0.0.1", "iburst": true},
                    {"address": "10.0.0.2", "weight": 1.5, "tags": {"true": "yes", "null": "none"}}
                ]
            })
        );
    }

    #[test]
    fn test_yaml_merge_keys_resolved() {
        let yaml = "\
base: &b
  mtu: 9000
  admin: enable
iface:
  <<: *b
  name: e1
  mtu: 1500
";
        let file = write_temp(".yaml", yaml);
        let json = load_json(&file);
        assert_eq!(
            json["iface"],
            serde_json::json!({"admin": "enable", "mtu": 1500, "name": "e1"})
        );
        assert!(json["iface"].get("<<").is_none());
        assert_eq!(json["base"], serde_json::json!({"admin": "enable", "mtu": 9000}));
    }

    #[test]
    fn test_yaml_bad_merge_value() {
        let file = write_temp(".yaml", "a:\n  <<: 1\n");
        assert!(matches!(load_file(file.path()), Err(LoadError::Yaml { .. })));
    }

    #[test]
    fn test_yaml_rejects_complex_keys() {
        let file = write_temp(".yaml", "? [a, b]\n: c\n");
        assert!(matches!(load_file(file.path()), Err(LoadError::UnsupportedKey { .. })));
    }

    #[test]
    fn test_yaml_rejects_non_finite() {
        let file = write_temp(".yaml", "x: .nan\n");
        assert!(matches!(load_file(file.path()), Err(LoadError::NonFiniteNumber { .. })));
    }

    #[test]
    fn test_yaml_syntax_error() {
        let file = write_temp(".yaml", "a: [1, 2\n");
        assert!(matches!(load_file(file.path()), Err(LoadError::Yaml { .. })));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".txt", "x");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(&err, LoadError::UnsupportedFormat { extension } if extension == ".txt"));
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(load_file(&missing), Err(LoadError::Io { .. })));
    }
}
