//! Typed values and the string-to-value encoder.
//!
//! Values are the gNMI `TypedValue` scalar kinds carried by updates and
//! replaces. [`encode_value`] turns loosely typed text into one of them.

use std::fmt;
use std::str::FromStr;

use crate::error::EncodingError;

/// Encodings a raw value can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Json,
    JsonIetf,
    String,
    Int,
    Uint,
    Bool,
    Decimal,
    Float,
    Bytes,
    Ascii,
}

impl Encoding {
    /// Every encoding, in the order they are listed in error messages.
    pub const ALL: [Encoding; 10] = [
        Encoding::Json,
        Encoding::JsonIetf,
        Encoding::String,
        Encoding::Int,
        Encoding::Uint,
        Encoding::Bool,
        Encoding::Decimal,
        Encoding::Float,
        Encoding::Bytes,
        Encoding::Ascii,
    ];

    /// Returns the lowercase tag for this encoding (e.g., "json_ietf").
    pub fn tag(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::JsonIetf => "json_ietf",
            Encoding::String => "string",
            Encoding::Int => "int",
            Encoding::Uint => "uint",
            Encoding::Bool => "bool",
            Encoding::Decimal => "decimal",
            Encoding::Float => "float",
            Encoding::Bytes => "bytes",
            Encoding::Ascii => "ascii",
        }
    }

    /// Parses a declared default encoding such as `JSON_IETF`.
    ///
    /// Declared defaults are case-insensitive; per-entry tags are not.
    pub fn from_declared(s: &str) -> Result<Encoding, EncodingError> {
        s.to_ascii_lowercase().parse()
    }

    /// Returns true for the two JSON flavors accepted with file values.
    pub fn is_json(&self) -> bool {
        matches!(self, Encoding::Json | Encoding::JsonIetf)
    }

    /// Renders the valid tags as `[json json_ietf ...]`.
    pub(crate) fn tag_list() -> String {
        let tags: Vec<&str> = Encoding::ALL.iter().map(Encoding::tag).collect();
        format!("[{}]", tags.join(" "))
    }
}

impl FromStr for Encoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .iter()
            .find(|e| e.tag() == s)
            .copied()
            .ok_or_else(|| EncodingError::UnknownType { tag: s.to_string() })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Fixed-point decimal: value = digits * 10^-precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal64 {
    pub digits: i64,
    pub precision: u32,
}

/// A gNMI typed value. Exactly one scalar kind per value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// RFC 7159 JSON document bytes.
    Json(Vec<u8>),
    /// RFC 7951 (IETF) JSON document bytes.
    JsonIetf(Vec<u8>),
    Ascii(String),
    String(String),
    Bool(bool),
    Bytes(Vec<u8>),
    Int(i64),
    Uint(u64),
    Float(f32),
    /// Only produced by decoding; [`encode_value`] refuses to build it.
    Decimal(Decimal64),
}

impl TypedValue {
    /// Returns the encoding this value corresponds to.
    pub fn encoding(&self) -> Encoding {
        match self {
            TypedValue::Json(_) => Encoding::Json,
            TypedValue::JsonIetf(_) => Encoding::JsonIetf,
            TypedValue::Ascii(_) => Encoding::Ascii,
            TypedValue::String(_) => Encoding::String,
            TypedValue::Bool(_) => Encoding::Bool,
            TypedValue::Bytes(_) => Encoding::Bytes,
            TypedValue::Int(_) => Encoding::Int,
            TypedValue::Uint(_) => Encoding::Uint,
            TypedValue::Float(_) => Encoding::Float,
            TypedValue::Decimal(_) => Encoding::Decimal,
        }
    }

    /// Wraps file or document bytes as one of the JSON flavors.
    ///
    /// Surrounding ASCII whitespace is trimmed. Returns None for non-JSON
    /// encodings.
    pub fn json_document(encoding: Encoding, data: &[u8]) -> Option<TypedValue> {
        let data = trim_ascii_whitespace(data).to_vec();
        match encoding {
            Encoding::Json => Some(TypedValue::Json(data)),
            Encoding::JsonIetf => Some(TypedValue::JsonIetf(data)),
            _ => None,
        }
    }
}

/// Trims spaces, tabs, carriage returns and newlines from both ends.
pub(crate) fn trim_ascii_whitespace(data: &[u8]) -> &[u8] {
    let is_ws = |b: &u8| matches!(b, b' ' | b'\r' | b'\n' | b'\t');
    let start = data.iter().position(|b| !is_ws(b)).unwrap_or(data.len());
    let end = data.iter().rposition(|b| !is_ws(b)).map_or(start, |i| i + 1);
    &data[start..end]
}

/// Encodes a raw string as the given encoding.
pub fn encode_value(encoding: Encoding, raw: &str) -> Result<TypedValue, EncodingError> {
    match encoding {
        Encoding::Json => encode_json_scalar(raw).map(TypedValue::Json),
        Encoding::JsonIetf => encode_json_scalar(raw).map(TypedValue::JsonIetf),
        Encoding::Ascii => Ok(TypedValue::Ascii(raw.to_string())),
        Encoding::String => Ok(TypedValue::String(raw.to_string())),
        Encoding::Bool => parse_bool(raw).map(TypedValue::Bool),
        Encoding::Bytes => Ok(TypedValue::Bytes(raw.as_bytes().to_vec())),
        Encoding::Int => raw.parse::<i64>().map(TypedValue::Int).map_err(|source| {
            EncodingError::InvalidInt { value: raw.to_string(), source }
        }),
        Encoding::Uint => parse_uint(raw).map(TypedValue::Uint),
        Encoding::Float => parse_float(raw).map(TypedValue::Float),
        Encoding::Decimal => Err(EncodingError::DecimalNotImplemented),
    }
}

/// Encodes a raw string using a per-entry type tag (e.g., "uint").
pub fn encode_tagged(tag: &str, raw: &str) -> Result<TypedValue, EncodingError> {
    encode_value(tag.parse()?, raw)
}

/// Wraps the input as a JSON string literal.
///
/// Leading `[` and trailing `]` characters are stripped first so that
/// bracket-wrapped scalars (`[value]`) encode as the bare scalar.
fn encode_json_scalar(raw: &str) -> Result<Vec<u8>, EncodingError> {
    let stripped = raw.trim_start_matches('[').trim_end_matches(']');
    let encoded = serde_json::to_vec(stripped)
        .map_err(|e| EncodingError::Json { reason: e.to_string() })?;
    Ok(trim_ascii_whitespace(&encoded).to_vec())
}

/// Parses an unsigned integer. Unlike `u64::from_str`, a leading `+` is
/// rejected.
fn parse_uint(raw: &str) -> Result<u64, EncodingError> {
    if raw.starts_with('+') {
        return Err(EncodingError::SignedUint { value: raw.to_string() });
    }
    raw.parse::<u64>()
        .map_err(|source| EncodingError::InvalidUint { value: raw.to_string(), source })
}

fn parse_bool(raw: &str) -> Result<bool, EncodingError> {
    match raw {
        "1" | "t" | "T" => Ok(true),
        "0" | "f" | "F" => Ok(false),
        _ if raw.eq_ignore_ascii_case("true") => Ok(true),
        _ if raw.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(EncodingError::InvalidBool { value: raw.to_string() }),
    }
}

fn parse_float(raw: &str) -> Result<f32, EncodingError> {
    let wide = raw
        .parse::<f64>()
        .map_err(|source| EncodingError::InvalidFloat { value: raw.to_string(), source })?;
    let narrow = wide as f32;
    if wide.is_finite() && narrow.is_infinite() {
        return Err(EncodingError::FloatOutOfRange { value: raw.to_string() });
    }
    Ok(narrow)
}
