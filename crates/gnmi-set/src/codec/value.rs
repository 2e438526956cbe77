//! Conversions between model values/paths and their wire messages.

use crate::codec::proto::{self, typed_value};
use crate::model::{Decimal64, Path, PathElem, TypedValue};

impl From<&TypedValue> for proto::TypedValue {
    fn from(value: &TypedValue) -> Self {
        let value = match value {
            TypedValue::Json(v) => typed_value::Value::JsonVal(v.clone()),
            TypedValue::JsonIetf(v) => typed_value::Value::JsonIetfVal(v.clone()),
            TypedValue::Ascii(s) => typed_value::Value::AsciiVal(s.clone()),
            TypedValue::String(s) => typed_value::Value::StringVal(s.clone()),
            TypedValue::Bool(b) => typed_value::Value::BoolVal(*b),
            TypedValue::Bytes(v) => typed_value::Value::BytesVal(v.clone()),
            TypedValue::Int(i) => typed_value::Value::IntVal(*i),
            TypedValue::Uint(u) => typed_value::Value::UintVal(*u),
            TypedValue::Float(f) => typed_value::Value::FloatVal(*f),
            TypedValue::Decimal(d) => typed_value::Value::DecimalVal(proto::Decimal64 {
                digits: d.digits,
                precision: d.precision,
            }),
        };
        proto::TypedValue { value: Some(value) }
    }
}

impl From<typed_value::Value> for TypedValue {
    fn from(value: typed_value::Value) -> Self {
        match value {
            typed_value::Value::JsonVal(v) => TypedValue::Json(v),
            typed_value::Value::JsonIetfVal(v) => TypedValue::JsonIetf(v),
            typed_value::Value::AsciiVal(s) => TypedValue::Ascii(s),
            typed_value::Value::StringVal(s) => TypedValue::String(s),
            typed_value::Value::BoolVal(b) => TypedValue::Bool(b),
            typed_value::Value::BytesVal(v) => TypedValue::Bytes(v),
            typed_value::Value::IntVal(i) => TypedValue::Int(i),
            typed_value::Value::UintVal(u) => TypedValue::Uint(u),
            typed_value::Value::FloatVal(f) => TypedValue::Float(f),
            typed_value::Value::DecimalVal(d) => TypedValue::Decimal(Decimal64 {
                digits: d.digits,
                precision: d.precision,
            }),
        }
    }
}

impl From<&Path> for proto::Path {
    fn from(path: &Path) -> Self {
        proto::Path {
            origin: path.origin.clone(),
            elem: path
                .elem
                .iter()
                .map(|e| proto::PathElem {
                    name: e.name.clone(),
                    key: e.key.clone(),
                })
                .collect(),
            target: path.target.clone(),
        }
    }
}

impl From<proto::Path> for Path {
    fn from(path: proto::Path) -> Self {
        Path {
            origin: path.origin,
            target: path.target,
            elem: path
                .elem
                .into_iter()
                .map(|e| PathElem { name: e.name, key: e.key })
                .collect(),
        }
    }
}
