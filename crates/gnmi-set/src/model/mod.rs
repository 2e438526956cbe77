//! Data model types for set requests.
//!
//! This module contains the core types:
//! - Paths (structured addresses and the string resolver)
//! - Values (typed scalars and the string encoder)
//! - Operations (deletes, updates, replaces and their value sources)
//! - Batch inputs (parallel-list descriptions of operations)
//! - Requests and the request builder

pub mod builder;
pub mod input;
pub mod op;
pub mod path;
pub mod request;
pub mod value;

pub use builder::SetRequestBuilder;
pub use input::{SetInput, DEFAULT_ENCODING, INLINE_DELIMITER, REPLACE_VALUE_ENCODING};
pub use op::{OpKind, Operation, ValueSource};
pub use path::{create_prefix, parse_path, Path, PathElem, PathResolver, XPathResolver};
pub use request::{SetRequest, Update};
pub use value::{encode_tagged, encode_value, Decimal64, Encoding, TypedValue};
