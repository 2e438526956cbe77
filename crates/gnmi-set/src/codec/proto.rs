//! gNMI protobuf messages used on the wire.
//!
//! Hand-derived with prost for the subset of `gnmi.proto` a SetRequest
//! needs. Field numbers match the published schema; deprecated and
//! unused fields are omitted and skipped on decode.

use std::collections::BTreeMap;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PathElem {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(btree_map = "string, string", tag = "2")]
    pub key: BTreeMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Path {
    #[prost(string, tag = "2")]
    pub origin: String,
    #[prost(message, repeated, tag = "3")]
    pub elem: Vec<PathElem>,
    #[prost(string, tag = "4")]
    pub target: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Decimal64 {
    #[prost(int64, tag = "1")]
    pub digits: i64,
    #[prost(uint32, tag = "2")]
    pub precision: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypedValue {
    #[prost(oneof = "typed_value::Value", tags = "1, 2, 3, 4, 5, 6, 7, 10, 11, 12")]
    pub value: Option<typed_value::Value>,
}

pub mod typed_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(string, tag = "1")]
        StringVal(String),
        #[prost(int64, tag = "2")]
        IntVal(i64),
        #[prost(uint64, tag = "3")]
        UintVal(u64),
        #[prost(bool, tag = "4")]
        BoolVal(bool),
        #[prost(bytes, tag = "5")]
        BytesVal(Vec<u8>),
        #[prost(float, tag = "6")]
        FloatVal(f32),
        #[prost(message, tag = "7")]
        DecimalVal(super::Decimal64),
        #[prost(bytes, tag = "10")]
        JsonVal(Vec<u8>),
        #[prost(bytes, tag = "11")]
        JsonIetfVal(Vec<u8>),
        #[prost(string, tag = "12")]
        AsciiVal(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Update {
    #[prost(message, optional, tag = "1")]
    pub path: Option<Path>,
    #[prost(message, optional, tag = "3")]
    pub val: Option<TypedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetRequest {
    #[prost(message, optional, tag = "1")]
    pub prefix: Option<Path>,
    #[prost(message, repeated, tag = "2")]
    pub delete: Vec<Path>,
    #[prost(message, repeated, tag = "3")]
    pub replace: Vec<Update>,
    #[prost(message, repeated, tag = "4")]
    pub update: Vec<Update>,
}
