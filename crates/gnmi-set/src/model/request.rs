//! SetRequest structure.
//!
//! A SetRequest is a prefix plus ordered deletes, replaces and updates, all
//! applied by the device as one transaction.

use crate::model::{Path, TypedValue};

/// A path paired with the value to write there.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub path: Path,
    pub val: TypedValue,
}

impl Update {
    pub fn new(path: Path, val: TypedValue) -> Self {
        Self { path, val }
    }
}

/// A complete set request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetRequest {
    /// Common prefix for every path, carrying the target name.
    pub prefix: Option<Path>,
    /// Paths to delete.
    pub delete: Vec<Path>,
    /// Full-subtree replacements.
    pub replace: Vec<Update>,
    /// Merging updates.
    pub update: Vec<Update>,
}

impl SetRequest {
    /// Creates an empty request with the given prefix.
    pub fn new(prefix: Option<Path>) -> Self {
        Self {
            prefix,
            ..Self::default()
        }
    }

    /// Returns the total number of deletes, replaces and updates.
    pub fn op_count(&self) -> usize {
        self.delete.len() + self.replace.len() + self.update.len()
    }

    /// Returns true if the request mutates nothing.
    pub fn is_empty(&self) -> bool {
        self.op_count() == 0
    }
}
