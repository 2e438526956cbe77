//! SetRequest assembly from batch descriptions.
//!
//! [`build_set_request`] resolves the prefix, validates the batch, then walks
//! its operations in order, resolving each path and value. The first failure
//! aborts the build; a partial request is never returned.

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, EncodingError};
use crate::load::load_file;
use crate::model::{
    encode_tagged, encode_value, Encoding, Operation, PathResolver, SetInput, SetRequest,
    SetRequestBuilder, TypedValue, ValueSource, XPathResolver,
};
use crate::validate::validate_set_input;

/// The device a request is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetContext {
    /// Prefix path string shared by every path in the request.
    pub prefix: String,
    /// Target name stamped on the prefix (e.g., "172.19.19.2:57400").
    pub target: String,
}

impl TargetContext {
    /// Creates a context for a target with an empty prefix path.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            target: target.into(),
        }
    }

    /// Sets the prefix path string.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Builds a SetRequest using the default xpath resolver.
pub fn build_set_request(input: &SetInput, ctx: &TargetContext) -> Result<SetRequest, BuildError> {
    build_set_request_with(&XPathResolver, input, ctx)
}

/// Builds a SetRequest, resolving paths with a custom resolver.
pub fn build_set_request_with<R>(
    resolver: &R,
    input: &SetInput,
    ctx: &TargetContext,
) -> Result<SetRequest, BuildError>
where
    R: PathResolver + ?Sized,
{
    let prefix = resolver
        .resolve_prefix(&ctx.prefix, &ctx.target)
        .map_err(BuildError::Prefix)?;
    validate_set_input(input)?;

    let mut builder = SetRequestBuilder::new().prefix(prefix);
    for op in input.operations() {
        let op = op?;
        let path = resolver.resolve(op.path()).map_err(|source| BuildError::Path {
            op: op.kind(),
            index: op.index(),
            path: op.path().to_string(),
            source,
        })?;
        tracing::trace!(op = %op.kind(), index = op.index(), path = %path, "resolved path");

        builder = match op {
            Operation::Delete { .. } => builder.delete(path),
            Operation::Update { source, .. } => {
                builder.update(path, resolve_value(&op, source, &input.encoding)?)
            }
            Operation::Replace { source, .. } => {
                builder.replace(path, resolve_value(&op, source, &input.encoding)?)
            }
        };
    }

    let req = builder.build();
    tracing::debug!(
        device = %ctx.target,
        deletes = req.delete.len(),
        replaces = req.replace.len(),
        updates = req.update.len(),
        "built set request"
    );
    Ok(req)
}

/// Resolves the value of an update or replace.
///
/// `declared` is the batch's declared encoding; file values must declare
/// one of the JSON flavors.
fn resolve_value(
    op: &Operation<'_>,
    source: ValueSource<'_>,
    declared: &str,
) -> Result<TypedValue, BuildError> {
    let encoding_error = |source: EncodingError| BuildError::Encoding {
        op: op.kind(),
        index: op.index(),
        path: op.path().to_string(),
        source,
    };

    match source {
        ValueSource::Inline { tag, raw } => encode_tagged(tag, raw).map_err(encoding_error),
        ValueSource::Default { encoding, raw } => Encoding::from_declared(encoding)
            .and_then(|encoding| encode_value(encoding, raw))
            .map_err(encoding_error),
        ValueSource::File(file) => {
            let data = load_file(file).map_err(|source| BuildError::Load {
                op: op.kind(),
                index: op.index(),
                path: op.path().to_string(),
                source,
            })?;
            Encoding::from_declared(declared)
                .ok()
                .and_then(|encoding| TypedValue::json_document(encoding, &data))
                .ok_or_else(|| BuildError::FileEncoding {
                    op: op.kind(),
                    index: op.index(),
                    path: op.path().to_string(),
                    encoding: declared.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::error::{ErrorKind, LoadError, PathError, ValidationError};
    use crate::model::{parse_path, Path, PathElem, Update};

    fn ctx() -> TargetContext {
        TargetContext::new("leaf1")
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_input_fails_no_paths() {
        let err = build_set_request(&SetInput::default(), &ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, BuildError::Validation(ValidationError::NoPaths)));
        assert_eq!(err.to_string(), "no paths provided");
    }

    #[test]
    fn test_inline_bool_update() {
        let input = SetInput::default().update_inline("/system/ntp", "bool", "true");
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(
            req.update,
            vec![Update::new(parse_path("/system/ntp").unwrap(), TypedValue::Bool(true))]
        );
        assert!(req.replace.is_empty());
        assert!(req.delete.is_empty());
    }

    #[test]
    fn test_positional_int_updates_in_order() {
        let input = SetInput::new("int").update_value("/a", "1").update_value("/b", "2");
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(
            req.update,
            vec![
                Update::new(parse_path("/a").unwrap(), TypedValue::Int(1)),
                Update::new(parse_path("/b").unwrap(), TypedValue::Int(2)),
            ]
        );
    }

    #[test]
    fn test_prefix_carries_target() {
        let input = SetInput::default().delete("/a");
        let req = build_set_request(&input, &ctx().with_prefix("/system")).unwrap();
        let prefix = req.prefix.unwrap();
        assert_eq!(prefix.target, "leaf1");
        assert_eq!(prefix.elem, vec![PathElem::new("system")]);

        let req = build_set_request(&input, &TargetContext::default()).unwrap();
        assert_eq!(req.prefix, None);
    }

    #[test]
    fn test_prefix_error_precedes_validation() {
        let err = build_set_request(&SetInput::default(), &ctx().with_prefix("/a[")).unwrap_err();
        assert!(matches!(err, BuildError::Prefix(PathError::UnbalancedBrackets { .. })));
        assert!(err.to_string().starts_with("prefix parse error: "));
    }

    #[test]
    fn test_assembly_order() {
        let input = SetInput::new("string")
            .delete(" /d1 ")
            .delete("/d2")
            .update_inline("/ui", "uint", "7")
            .replace_inline("/ri", "ascii", "x")
            .update_value("/u", "v")
            .replace_value("/r", "w");
        let req = build_set_request(&input, &ctx()).unwrap();

        let paths = |updates: &[Update]| -> Vec<String> {
            updates.iter().map(|u| u.path.to_string()).collect()
        };
        assert_eq!(req.delete, vec![parse_path("/d1").unwrap(), parse_path("/d2").unwrap()]);
        assert_eq!(paths(&req.update), vec!["/ui", "/u"]);
        assert_eq!(paths(&req.replace), vec!["/ri", "/r"]);
        assert_eq!(req.update[0].val, TypedValue::Uint(7));
        assert_eq!(req.update[1].val, TypedValue::String("v".to_string()));
        assert_eq!(req.replace[0].val, TypedValue::Ascii("x".to_string()));
    }

    // Positional replace values are encoded as json whatever the declared
    // encoding; positional update values follow the declared encoding.
    #[test]
    fn test_replace_values_default_to_json() {
        let input = SetInput::new("int").update_value("/u", "5").replace_value("/r", "5");
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(req.update[0].val, TypedValue::Int(5));
        assert_eq!(req.replace[0].val, TypedValue::Json(b"\"5\"".to_vec()));
    }

    #[test]
    fn test_declared_encoding_case_insensitive() {
        let input = SetInput::new("JSON_IETF").update_value("/u", "enable");
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(req.update[0].val, TypedValue::JsonIetf(b"\"enable\"".to_vec()));
    }

    #[test]
    fn test_inline_tag_case_sensitive() {
        let input = SetInput::default().update_inline("/a", "BOOL", "true");
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Encoding { source: EncodingError::UnknownType { .. }, .. }
        ));
    }

    #[test]
    fn test_encoding_error_localized() {
        let input = SetInput::new("int")
            .update_value("/a", "1")
            .update_value("/b", "99999999999999999999");
        let err = build_set_request(&input, &ctx()).unwrap_err();
        match err {
            BuildError::Encoding { op, index, path, source } => {
                assert_eq!(op, crate::model::OpKind::Update);
                assert_eq!(index, 1);
                assert_eq!(path, "/b");
                assert!(matches!(source, EncodingError::InvalidInt { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decimal_aborts_build() {
        let input = SetInput::default().delete("/a").update_inline("/b", "decimal", "1.5");
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_delete_parse_error_precedes_inline_format_error() {
        let mut input = SetInput::default().delete("/a[");
        input.updates.push("/b:::bool".to_string());
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let mut input = SetInput::default().delete("/a");
        input.updates.push("/b:::bool".to_string());
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.to_string(), "invalid inline update format: [/b:::bool]");
    }

    #[test]
    fn test_length_mismatch() {
        let mut input = SetInput::default();
        input.update_paths = vec!["/a".to_string(), "/b".to_string()];
        input.update_values = vec!["1".to_string()];
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert!(matches!(err, BuildError::Validation(ValidationError::MissingUpdateValue)));
    }

    #[test]
    fn test_update_from_yaml_file() {
        let file = write_temp(".yaml", "admin-state: enable\nserver:\n  - address: 10.0.0.1\n");
        let path = file.path().to_str().unwrap();
        let input = SetInput::new("JSON_IETF").update_file("/system/ntp", path);
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(
            req.update[0].val,
            TypedValue::JsonIetf(
                br#"{"admin-state":"enable","server":[{"address":"10.0.0.1"}]}"#.to_vec()
            )
        );
    }

    #[test]
    fn test_replace_from_json_file_trimmed() {
        let file = write_temp(".json", "\n  {\"a\": 1}\n\n");
        let path = file.path().to_str().unwrap();
        let input = SetInput::new("json").replace_file("/x", path);
        let req = build_set_request(&input, &ctx()).unwrap();
        assert_eq!(req.replace[0].val, TypedValue::Json(b"{\"a\": 1}".to_vec()));
    }

    #[test]
    fn test_file_values_require_json_encoding() {
        let file = write_temp(".json", "{}");
        let path = file.path().to_str().unwrap();
        let input = SetInput::new("ascii").update_file("/x", path);
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "update #0 at \"/x\": encoding: ascii not supported together with file values"
        );

        let input = SetInput::new("uint")
            .replace_file("/a", path)
            .replace_file("/b", path);
        match build_set_request(&input, &ctx()).unwrap_err() {
            BuildError::FileEncoding { op, index, path, encoding } => {
                assert_eq!(op, crate::model::OpKind::Replace);
                assert_eq!(index, 0);
                assert_eq!(path, "/a");
                assert_eq!(encoding, "uint");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_aborts_build() {
        let input = SetInput::default()
            .update_value("/ok", "1")
            .replace_file("/x", "/nonexistent/payload.json");
        let err = build_set_request(&input, &ctx()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(matches!(err, BuildError::Load { source: LoadError::Io { .. }, .. }));
    }

    #[test]
    fn test_custom_resolver() {
        struct Flat;
        impl PathResolver for Flat {
            fn resolve(&self, path: &str) -> Result<Path, PathError> {
                Ok(Path::root().push(PathElem::new(path)))
            }
        }

        let input = SetInput::default().delete("a/b[c");
        let req = build_set_request_with(&Flat, &input, &ctx()).unwrap();
        assert_eq!(req.delete[0].elem[0].name, "a/b[c");
    }
}
