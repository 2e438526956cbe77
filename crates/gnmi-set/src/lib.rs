//! gnmi-set: gNMI SetRequest construction for network device configuration.
//!
//! This crate turns a batch of configuration mutations (deletes, updates
//! and replaces) into a single gNMI `SetRequest`, ready to be sent to a
//! device as one transaction.
//!
//! # Overview
//!
//! A batch is described by a [`SetInput`]. Values can be given three ways:
//! - **Inline**: `path:::type:::value` triples with a per-entry type tag
//! - **Positional**: parallel path and value lists using the batch's
//!   declared encoding
//! - **File**: parallel path and file lists; JSON and YAML files are sent
//!   as JSON documents
//!
//! # Quick Start
//!
//! ```rust
//! use gnmi_set::{build_set_request, encode_set_request, SetInput, TargetContext, TypedValue};
//!
//! let input = SetInput::new("uint")
//!     .delete("/interface[name=ethernet-1/1]/description")
//!     .update_inline("/system/ntp/admin-state", "string", "enable")
//!     .update_value("/system/mtu/default-port-mtu", "9232");
//!
//! let ctx = TargetContext::new("172.19.19.2:57400");
//! let req = build_set_request(&input, &ctx).unwrap();
//!
//! assert_eq!(req.delete.len(), 1);
//! assert_eq!(req.update[1].val, TypedValue::Uint(9232));
//! assert_eq!(req.prefix.unwrap().target, "172.19.19.2:57400");
//!
//! let bytes = encode_set_request(&build_set_request(&input, &ctx).unwrap());
//! assert!(!bytes.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Paths, typed values, operations, batches and requests
//! - [`build`]: Request assembly from batches
//! - [`validate`]: Structural checks on batches
//! - [`load`]: JSON/YAML payload files
//! - [`codec`]: gNMI protobuf wire format
//! - [`pairs`]: Updates from `path:value` pairs with inferred types
//! - [`ntp`]: NTP container payloads
//! - [`config`]: Client settings from the environment
//! - [`error`]: Error types
//!
//! # Errors
//!
//! Every build failure aborts the whole request; a partially built request
//! is never returned. [`BuildError::kind`] classifies failures as
//! validation, parse, load, encoding or format errors.

pub mod build;
pub mod codec;
pub mod config;
pub mod error;
pub mod load;
pub mod model;
pub mod ntp;
pub mod pairs;
pub mod validate;

// Re-export commonly used types at crate root
pub use build::{build_set_request, build_set_request_with, TargetContext};
pub use codec::{decode_set_request, encode_set_request};
pub use config::ClientConfig;
pub use error::{
    BuildError, DecodeError, EncodingError, ErrorKind, LoadError, NtpError, PathError,
    ValidationError,
};
pub use load::load_file;
pub use model::{
    create_prefix, encode_tagged, encode_value, parse_path, Encoding, OpKind, Operation, Path,
    PathElem, PathResolver, SetInput, SetRequest, SetRequestBuilder, TypedValue, Update,
    ValueSource, XPathResolver,
};
pub use ntp::{NtpServer, NtpSpec};
pub use pairs::parse_update_pairs;
pub use validate::validate_set_input;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
