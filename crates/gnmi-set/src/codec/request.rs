//! SetRequest encoding/decoding.
//!
//! Requests are encoded as gNMI `SetRequest` protobuf messages, ready for a
//! transport to send as-is.

use prost::Message;

use crate::codec::proto;
use crate::error::DecodeError;
use crate::model::{OpKind, SetRequest, Update};

/// Converts a request into its wire message.
pub fn to_wire(req: &SetRequest) -> proto::SetRequest {
    proto::SetRequest {
        prefix: req.prefix.as_ref().map(proto::Path::from),
        delete: req.delete.iter().map(proto::Path::from).collect(),
        replace: req.replace.iter().map(update_to_wire).collect(),
        update: req.update.iter().map(update_to_wire).collect(),
    }
}

/// Converts a wire message into a request.
///
/// Every update and replace must carry a path and a value.
pub fn from_wire(msg: proto::SetRequest) -> Result<SetRequest, DecodeError> {
    Ok(SetRequest {
        prefix: msg.prefix.map(Into::into),
        delete: msg.delete.into_iter().map(Into::into).collect(),
        replace: updates_from_wire(OpKind::Replace, msg.replace)?,
        update: updates_from_wire(OpKind::Update, msg.update)?,
    })
}

/// Encodes a request to protobuf bytes.
pub fn encode_set_request(req: &SetRequest) -> Vec<u8> {
    to_wire(req).encode_to_vec()
}

/// Decodes a request from protobuf bytes.
pub fn decode_set_request(input: &[u8]) -> Result<SetRequest, DecodeError> {
    from_wire(proto::SetRequest::decode(input)?)
}

fn update_to_wire(update: &Update) -> proto::Update {
    proto::Update {
        path: Some(proto::Path::from(&update.path)),
        val: Some(proto::TypedValue::from(&update.val)),
    }
}

fn updates_from_wire(op: OpKind, updates: Vec<proto::Update>) -> Result<Vec<Update>, DecodeError> {
    updates
        .into_iter()
        .enumerate()
        .map(|(index, u)| {
            let path = u.path.ok_or(DecodeError::MissingPath { op, index })?;
            let val = u
                .val
                .and_then(|v| v.value)
                .ok_or(DecodeError::MissingValue { op, index })?;
            Ok(Update::new(path.into(), val.into()))
        })
        .collect()
}
