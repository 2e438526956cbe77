//! Operation types for SetRequest mutations.
//!
//! A batch description lowers into an ordered sequence of operations, each
//! a delete, update or replace of a single path. Updates and replaces carry
//! a [`ValueSource`] saying where their value comes from.

use std::fmt;

/// Category of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Delete,
    Update,
    Replace,
}

impl OpKind {
    /// Returns the lowercase label (e.g., "replace").
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Delete => "delete",
            OpKind::Update => "update",
            OpKind::Replace => "replace",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an update or replace value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource<'a> {
    /// Inline triple: the entry's own type tag (case-sensitive) and raw value.
    Inline { tag: &'a str, raw: &'a str },
    /// A JSON or YAML file, wrapped as a JSON document.
    File(&'a str),
    /// A raw value encoded with a declared default encoding (case-insensitive).
    Default { encoding: &'a str, raw: &'a str },
}

/// A single mutation borrowed from a batch description.
///
/// `index` is the entry's position within the list it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    Delete {
        index: usize,
        path: &'a str,
    },
    Update {
        index: usize,
        path: &'a str,
        source: ValueSource<'a>,
    },
    Replace {
        index: usize,
        path: &'a str,
        source: ValueSource<'a>,
    },
}

impl<'a> Operation<'a> {
    /// Returns the mutation category.
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Delete { .. } => OpKind::Delete,
            Operation::Update { .. } => OpKind::Update,
            Operation::Replace { .. } => OpKind::Replace,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Operation::Delete { index, .. }
            | Operation::Update { index, .. }
            | Operation::Replace { index, .. } => *index,
        }
    }

    /// Returns the path string, trimmed of surrounding whitespace.
    pub fn path(&self) -> &'a str {
        match self {
            Operation::Delete { path, .. }
            | Operation::Update { path, .. }
            | Operation::Replace { path, .. } => path.trim(),
        }
    }

    /// Returns the value source; None for deletes.
    pub fn source(&self) -> Option<ValueSource<'a>> {
        match self {
            Operation::Delete { .. } => None,
            Operation::Update { source, .. } | Operation::Replace { source, .. } => Some(*source),
        }
    }
}
