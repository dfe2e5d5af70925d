//! E2SM-RSM control message encoding
//!
//! Turns typed slice parameters into the two protobuf blobs (control header
//! and control message) carried by an E2 control request, and decodes them
//! back for inspection.

pub mod e2sm_rsm;
pub mod control;
pub mod decode;
pub mod error;

pub use control::ControlMessageHandler;
pub use decode::{decode_command, decode_control_message, ControlPayload, DecodedControl};
pub use error::EncodingError;
