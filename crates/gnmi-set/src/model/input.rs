//! Batch descriptions of set operations.
//!
//! A [`SetInput`] holds deletes, inline `path:::type:::value` triples and
//! positional path/value or path/file lists. [`SetInput::operations`] lowers
//! it into an ordered sequence of [`Operation`]s.

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, ValidationError};
use crate::model::{OpKind, Operation, ValueSource};

/// Separator between the fields of an inline triple.
pub const INLINE_DELIMITER: &str = ":::";

/// Declared encoding used when none is given.
pub const DEFAULT_ENCODING: &str = "json_ietf";

/// Default encoding of positional replace values, independent of the
/// declared encoding.
pub const REPLACE_VALUE_ENCODING: &str = "json";

/// A batch of set operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetInput {
    pub deletes: Vec<String>,
    /// Inline update triples.
    pub updates: Vec<String>,
    /// Inline replace triples.
    pub replaces: Vec<String>,

    pub update_paths: Vec<String>,
    pub update_values: Vec<String>,
    pub update_files: Vec<String>,

    pub replace_paths: Vec<String>,
    pub replace_values: Vec<String>,
    pub replace_files: Vec<String>,

    /// Declared default encoding for positional update values and file values.
    pub encoding: String,
}

impl Default for SetInput {
    fn default() -> Self {
        Self::new(DEFAULT_ENCODING)
    }
}

impl SetInput {
    /// Creates an empty batch with the given declared encoding.
    pub fn new(encoding: impl Into<String>) -> Self {
        Self {
            deletes: Vec::new(),
            updates: Vec::new(),
            replaces: Vec::new(),
            update_paths: Vec::new(),
            update_values: Vec::new(),
            update_files: Vec::new(),
            replace_paths: Vec::new(),
            replace_values: Vec::new(),
            replace_files: Vec::new(),
            encoding: encoding.into(),
        }
    }

    /// Adds a delete.
    pub fn delete(mut self, path: impl Into<String>) -> Self {
        self.deletes.push(path.into());
        self
    }

    /// Adds an inline update triple.
    pub fn update_inline(mut self, path: &str, tag: &str, value: &str) -> Self {
        self.updates.push(inline_triple(path, tag, value));
        self
    }

    /// Adds an inline replace triple.
    pub fn replace_inline(mut self, path: &str, tag: &str, value: &str) -> Self {
        self.replaces.push(inline_triple(path, tag, value));
        self
    }

    /// Adds a positional update encoded with the declared encoding.
    pub fn update_value(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.update_paths.push(path.into());
        self.update_values.push(value.into());
        self
    }

    /// Adds a positional update read from a JSON or YAML file.
    pub fn update_file(mut self, path: impl Into<String>, file: impl Into<String>) -> Self {
        self.update_paths.push(path.into());
        self.update_files.push(file.into());
        self
    }

    /// Adds a positional replace encoded as `json`.
    pub fn replace_value(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.replace_paths.push(path.into());
        self.replace_values.push(value.into());
        self
    }

    /// Adds a positional replace read from a JSON or YAML file.
    pub fn replace_file(mut self, path: impl Into<String>, file: impl Into<String>) -> Self {
        self.replace_paths.push(path.into());
        self.replace_files.push(file.into());
        self
    }

    /// Returns true if no path-bearing list has entries.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.updates.is_empty()
            && self.replaces.is_empty()
            && self.update_paths.is_empty()
            && self.replace_paths.is_empty()
    }

    /// Returns true if positional updates read their values from files.
    pub fn uses_update_files(&self) -> bool {
        !self.update_files.is_empty() && self.update_values.is_empty()
    }

    /// Returns true if positional replaces read their values from files.
    pub fn uses_replace_files(&self) -> bool {
        !self.replace_files.is_empty() && self.replace_values.is_empty()
    }

    /// Lowers the batch into operations, in request order.
    ///
    /// Order is deletes, inline updates, inline replaces, positional updates,
    /// positional replaces. Malformed inline triples yield
    /// [`BuildError::Format`] at their position in the sequence.
    pub fn operations(&self) -> impl Iterator<Item = Result<Operation<'_>, BuildError>> + '_ {
        let deletes = self
            .deletes
            .iter()
            .enumerate()
            .map(|(index, path)| {
                Ok::<_, BuildError>(Operation::Delete {
                    index,
                    path: path.as_str(),
                })
            });

        let inline_updates = self
            .updates
            .iter()
            .enumerate()
            .map(move |(index, entry)| {
                let (path, source) = split_inline(OpKind::Update, entry, &self.updates)?;
                Ok::<_, BuildError>(Operation::Update { index, path, source })
            });
        let inline_replaces = self
            .replaces
            .iter()
            .enumerate()
            .map(move |(index, entry)| {
                let (path, source) = split_inline(OpKind::Replace, entry, &self.replaces)?;
                Ok::<_, BuildError>(Operation::Replace { index, path, source })
            });

        let use_update_files = self.uses_update_files();
        let positional_updates = self.update_paths.iter().enumerate().map(move |(index, path)| {
            let source = if use_update_files {
                self.update_files.get(index).map(|f| ValueSource::File(f.as_str()))
            } else {
                self.update_values.get(index).map(|raw| ValueSource::Default {
                    encoding: self.encoding.as_str(),
                    raw: raw.as_str(),
                })
            };
            match source {
                Some(source) => Ok(Operation::Update { index, path: path.as_str(), source }),
                None => Err(BuildError::Validation(ValidationError::MissingUpdateValue)),
            }
        });

        let use_replace_files = self.uses_replace_files();
        let positional_replaces = self.replace_paths.iter().enumerate().map(move |(index, path)| {
            let source = if use_replace_files {
                self.replace_files.get(index).map(|f| ValueSource::File(f.as_str()))
            } else {
                self.replace_values.get(index).map(|raw| ValueSource::Default {
                    encoding: REPLACE_VALUE_ENCODING,
                    raw: raw.as_str(),
                })
            };
            match source {
                Some(source) => Ok(Operation::Replace { index, path: path.as_str(), source }),
                None => Err(BuildError::Validation(ValidationError::MissingReplaceValue)),
            }
        });

        deletes
            .chain(inline_updates)
            .chain(inline_replaces)
            .chain(positional_updates)
            .chain(positional_replaces)
    }
}

fn inline_triple(path: &str, tag: &str, value: &str) -> String {
    [path, tag, value].join(INLINE_DELIMITER)
}

/// Splits an inline triple into its path and value source. Fields past the
/// third are ignored.
fn split_inline<'a>(
    kind: OpKind,
    entry: &'a str,
    batch: &[String],
) -> Result<(&'a str, ValueSource<'a>), BuildError> {
    let fields: Vec<&str> = entry.split(INLINE_DELIMITER).collect();
    let &[path, tag, raw, ..] = fields.as_slice() else {
        return Err(BuildError::Format {
            op: kind,
            batch: format!("[{}]", batch.join(" ")),
        });
    };
    Ok((path, ValueSource::Inline { tag, raw }))
}
