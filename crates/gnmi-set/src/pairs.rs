//! Updates from `path:value` pairs.
//!
//! The value's type is inferred from its text: quoted strings, then
//! integers, floats and booleans, falling back to a plain string. A value
//! of `@file` sends the file's contents as a JSON_IETF document.

use crate::error::{BuildError, LoadError};
use crate::model::value::trim_ascii_whitespace;
use crate::model::{encode_value, parse_path, Encoding, OpKind, TypedValue, Update};

/// Parses `path:value` pairs into updates, in order.
///
/// Each pair splits at its first `:`, so the path itself must not contain
/// one.
pub fn parse_update_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Vec<Update>, BuildError> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| parse_pair(index, pair.as_ref()))
        .collect()
}

fn parse_pair(index: usize, pair: &str) -> Result<Update, BuildError> {
    let (path_str, raw) = match pair.split_once(':') {
        Some((path, raw)) if !raw.is_empty() => (path, raw),
        _ => return Err(BuildError::InvalidPair { pair: pair.to_string() }),
    };

    let path = parse_path(path_str).map_err(|source| BuildError::Path {
        op: OpKind::Update,
        index,
        path: path_str.to_string(),
        source,
    })?;

    let val = match raw.strip_prefix('@') {
        Some(file) => {
            let data = std::fs::read(file).map_err(|source| BuildError::Load {
                op: OpKind::Update,
                index,
                path: path_str.to_string(),
                source: LoadError::Io { path: file.into(), source },
            })?;
            TypedValue::JsonIetf(trim_ascii_whitespace(&data).to_vec())
        }
        None => infer_value(raw),
    };
    tracing::trace!(index, path = %path, encoding = %val.encoding(), "parsed pair");
    Ok(Update::new(path, val))
}

fn infer_value(raw: &str) -> TypedValue {
    if let Some(s) = unquote(raw) {
        return TypedValue::String(s);
    }
    [Encoding::Int, Encoding::Float, Encoding::Bool]
        .into_iter()
        .find_map(|encoding| encode_value(encoding, raw).ok())
        .unwrap_or_else(|| TypedValue::String(raw.to_string()))
}

/// Removes one level of quoting, or returns None if `raw` is not a
/// complete quoted literal.
fn unquote(raw: &str) -> Option<String> {
    if raw.len() < 2 {
        return None;
    }
    match raw.as_bytes()[0] {
        b'"' => serde_json::from_str::<String>(raw).ok(),
        b'`' => {
            let inner = raw.strip_prefix('`')?.strip_suffix('`')?;
            (!inner.contains('`')).then(|| inner.replace('\r', ""))
        }
        b'\'' => {
            let inner = raw.strip_prefix('\'')?.strip_suffix('\'')?;
            let mut chars = inner.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '\'' => Some(c.to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn single(pair: &str) -> TypedValue {
        parse_update_pairs(&[pair]).unwrap().remove(0).val
    }

    #[test]
    fn test_inference_order() {
        assert_eq!(single("/a:42"), TypedValue::Int(42));
        assert_eq!(single("/a:-3"), TypedValue::Int(-3));
        assert_eq!(single("/a:1.5"), TypedValue::Float(1.5));
        assert_eq!(single("/a:true"), TypedValue::Bool(true));
        assert_eq!(single("/a:F"), TypedValue::Bool(false));
        assert_eq!(single("/a:enable"), TypedValue::String("enable".to_string()));
        // integers win over bools
        assert_eq!(single("/a:1"), TypedValue::Int(1));
        // too wide for f32
        assert_eq!(single("/a:1e40"), TypedValue::String("1e40".to_string()));
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(single(r#"/a:"42""#), TypedValue::String("42".to_string()));
        assert_eq!(single(r#"/a:"a\tb""#), TypedValue::String("a\tb".to_string()));
        assert_eq!(single("/a:`raw \\n`"), TypedValue::String("raw \\n".to_string()));
        assert_eq!(single("/a:'x'"), TypedValue::String("x".to_string()));
        // unterminated quotes stay verbatim
        assert_eq!(single(r#"/a:"open"#), TypedValue::String(r#""open"#.to_string()));
    }

    #[test]
    fn test_splits_on_first_colon() {
        let updates = parse_update_pairs(&["/system/name/host-name:leaf:1"]).unwrap();
        assert_eq!(updates[0].path.to_string(), "/system/name/host-name");
        assert_eq!(updates[0].val, TypedValue::String("leaf:1".to_string()));
    }

    #[test]
    fn test_invalid_pairs() {
        for pair in ["/a", "/a:", ""] {
            let err = parse_update_pairs(&[pair]).unwrap_err();
            assert!(matches!(&err, BuildError::InvalidPair { pair: p } if p == pair));
            assert_eq!(err.to_string(), format!("invalid path-value pair: {pair}"));
        }
    }

    #[test]
    fn test_bad_path_reports_index() {
        let err = parse_update_pairs(&["/a:1", "/b[:2"]).unwrap_err();
        assert!(matches!(err, BuildError::Path { index: 1, .. }));
    }

    #[test]
    fn test_file_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\n {\"admin-state\": \"enable\"} \r\n").unwrap();
        let pair = format!("/system/ntp:@{}", file.path().display());
        assert_eq!(
            single(&pair),
            TypedValue::JsonIetf(br#"{"admin-state": "enable"}"#.to_vec())
        );

        let err = parse_update_pairs(&["/system/ntp:@/nonexistent/ntp.json"]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Load { source: LoadError::Io { .. }, .. }
        ));
    }

    #[test]
    fn test_order_preserved() {
        let updates = parse_update_pairs(&["/a:1", "/b:x", "/c:false"]).unwrap();
        let paths: Vec<_> = updates.iter().map(|u| u.path.to_string()).collect();
        assert_eq!(paths, ["/a", "/b", "/c"]);
    }
}
