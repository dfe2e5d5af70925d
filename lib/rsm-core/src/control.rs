//! E2 control message handed to a node's control session
use bytes::Bytes;

/// Encoded control request: header and payload are serialized independently.
///
/// Immutable once built; cloning shares the underlying buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlMessage {
    header: Bytes,
    payload: Bytes,
}

impl ControlMessage {
    pub fn new(header: impl Into<Bytes>, payload: impl Into<Bytes>) -> Self {
        Self {
            header: header.into(),
            payload: payload.into(),
        }
    }

    pub fn header(&self) -> &Bytes {
        &self.header
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }
}
