//! Error types for request building, value encoding, payload loading and
//! wire decoding.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

use crate::model::{Encoding, OpKind};

/// Coarse error taxonomy shared by every [`BuildError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Structural mismatch in the batch description.
    Validation,
    /// A path or prefix string failed to resolve.
    Parse,
    /// File I/O failure or unsupported file format.
    Load,
    /// A value could not be converted to the requested type.
    Encoding,
    /// An inline triple or path/value pair was malformed.
    Format,
}

impl ErrorKind {
    /// Returns the kind as a lowercase label (e.g., "validation").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Parse => "parse",
            ErrorKind::Load => "load",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Format => "format",
        }
    }
}

/// Error converting a raw string into a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("unknown type '{tag}', must be one of: {}", Encoding::tag_list())]
    UnknownType { tag: String },

    #[error("invalid bool value '{value}'")]
    InvalidBool { value: String },

    #[error("invalid int value '{value}': {source}")]
    InvalidInt { value: String, source: ParseIntError },

    #[error("invalid uint value '{value}': {source}")]
    InvalidUint { value: String, source: ParseIntError },

    #[error("invalid uint value '{value}': sign not allowed")]
    SignedUint { value: String },

    #[error("invalid float value '{value}': {source}")]
    InvalidFloat { value: String, source: ParseFloatError },

    #[error("float value '{value}' out of range for 32-bit float")]
    FloatOutOfRange { value: String },

    #[error("decimal type not implemented")]
    DecimalNotImplemented,

    #[error("json encoding failed: {reason}")]
    Json { reason: String },
}

/// Error reading or normalizing a payload file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file format {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported YAML mapping key: {key}")]
    UnsupportedKey { key: String },

    #[error("number {value} cannot be represented in JSON")]
    NonFiniteNumber { value: f64 },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural error in a batch description, detected before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no paths provided")]
    NoPaths,

    #[error("set update from file and value are not supported in the same command")]
    UpdateFileAndValue,

    #[error("set replace from file and value are not supported in the same command")]
    ReplaceFileAndValue,

    #[error("missing update value/file or path")]
    MissingUpdateValue,

    #[error("missing replace value/file or path")]
    MissingReplaceValue,
}

/// Error parsing a path string into a structured path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unbalanced brackets in path {path:?}")]
    UnbalancedBrackets { path: String },

    #[error("empty element name in path {path:?}")]
    EmptyElem { path: String },

    #[error("missing '=' in key of element {elem:?}")]
    MissingEquals { elem: String },

    #[error("empty key name in element {elem:?}")]
    EmptyKey { elem: String },

    #[error("duplicate key {key:?} in element {elem:?}")]
    DuplicateKey { elem: String, key: String },

    #[error("unexpected character {found:?} after key in element {elem:?}")]
    TrailingCharacters { elem: String, found: char },
}

/// Error decoding a SetRequest from wire bytes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("protobuf decode failed: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("{op} #{index} has no path")]
    MissingPath { op: OpKind, index: usize },

    #[error("{op} #{index} has no value")]
    MissingValue { op: OpKind, index: usize },
}

/// Error checking or rendering an NTP spec.
#[derive(Debug, Error)]
pub enum NtpError {
    #[error("network instance must not be empty")]
    EmptyNetworkInstance,

    #[error("invalid admin state {0:?}, must be one of: [enable disable]")]
    InvalidAdminState(String),

    #[error("server #{index} has an empty address")]
    EmptyServerAddress { index: usize },

    #[error("prefix parse error: {0}")]
    Prefix(#[source] PathError),

    #[error("serializing ntp spec: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error building a SetRequest. Every failure aborts the whole build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("prefix parse error: {0}")]
    Prefix(#[source] PathError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{op} #{index} path {path:?}: {source}")]
    Path {
        op: OpKind,
        index: usize,
        path: String,
        #[source]
        source: PathError,
    },

    #[error("invalid inline {op} format: {batch}")]
    Format { op: OpKind, batch: String },

    #[error("{op} #{index} at {path:?}: {source}")]
    Encoding {
        op: OpKind,
        index: usize,
        path: String,
        #[source]
        source: EncodingError,
    },

    #[error("{op} #{index} at {path:?}: {source}")]
    Load {
        op: OpKind,
        index: usize,
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("{op} #{index} at {path:?}: encoding: {encoding} not supported together with file values")]
    FileEncoding {
        op: OpKind,
        index: usize,
        path: String,
        encoding: String,
    },

    #[error("invalid path-value pair: {pair}")]
    InvalidPair { pair: String },
}

impl BuildError {
    /// Returns the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Validation(_) => ErrorKind::Validation,
            BuildError::Prefix(_) | BuildError::Path { .. } => ErrorKind::Parse,
            BuildError::Load { .. } => ErrorKind::Load,
            BuildError::Encoding { .. } | BuildError::FileEncoding { .. } => ErrorKind::Encoding,
            BuildError::Format { .. } | BuildError::InvalidPair { .. } => ErrorKind::Format,
        }
    }
}
