//! Wire encoding for set requests.
//!
//! Requests are carried as gNMI protobuf messages. The model types convert
//! to and from the messages in [`proto`]; [`encode_set_request`] and
//! [`decode_set_request`] wrap the conversion and the protobuf codec.

pub mod proto;
pub mod request;
mod value;

pub use request::{decode_set_request, encode_set_request, from_wire, to_wire};
