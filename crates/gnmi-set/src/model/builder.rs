//! Builder API for ergonomic SetRequest construction.
//!
//! # Example
//!
//! ```rust
//! use gnmi_set::model::builder::SetRequestBuilder;
//! use gnmi_set::{parse_path, TypedValue};
//!
//! let req = SetRequestBuilder::new()
//!     .target("leaf1")
//!     .delete(parse_path("/system/ntp/server[address=10.0.0.1]").unwrap())
//!     .update(parse_path("/system/ntp/admin-state").unwrap(), TypedValue::String("enable".into()))
//!     .build();
//!
//! assert_eq!(req.op_count(), 2);
//! assert_eq!(req.prefix.unwrap().target, "leaf1");
//! ```

use crate::model::{Path, SetRequest, TypedValue, Update};

/// Builder for constructing a SetRequest.
#[derive(Debug, Clone, Default)]
pub struct SetRequestBuilder {
    prefix: Option<Path>,
    delete: Vec<Path>,
    replace: Vec<Update>,
    update: Vec<Update>,
}

impl SetRequestBuilder {
    /// Creates an empty builder with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request prefix.
    pub fn prefix(mut self, prefix: Option<Path>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the target on the prefix, creating a root prefix if needed.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.prefix.get_or_insert_with(Path::root).target = target.into();
        self
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a delete.
    pub fn delete(mut self, path: Path) -> Self {
        self.delete.push(path);
        self
    }

    /// Adds a merging update.
    pub fn update(mut self, path: Path, val: TypedValue) -> Self {
        self.update.push(Update::new(path, val));
        self
    }

    /// Adds a full-subtree replace.
    pub fn replace(mut self, path: Path, val: TypedValue) -> Self {
        self.replace.push(Update::new(path, val));
        self
    }

    /// Adds several updates.
    pub fn updates(mut self, updates: impl IntoIterator<Item = Update>) -> Self {
        self.update.extend(updates);
        self
    }

    /// Adds several replaces.
    pub fn replaces(mut self, replaces: impl IntoIterator<Item = Update>) -> Self {
        self.replace.extend(replaces);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Returns the number of mutations added so far.
    pub fn op_count(&self) -> usize {
        self.delete.len() + self.replace.len() + self.update.len()
    }

    /// Builds the final SetRequest.
    pub fn build(self) -> SetRequest {
        SetRequest {
            prefix: self.prefix,
            delete: self.delete,
            replace: self.replace,
            update: self.update,
        }
    }
}
