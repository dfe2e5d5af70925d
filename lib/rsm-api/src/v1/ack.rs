use serde::{Deserialize, Serialize};

/// Acknowledgment returned by every RSM operation.
///
/// Failures of a well-formed request (bad field, encoding or routing problem)
/// are reported here with `success == false`, never as a transport error, so
/// clients must inspect the ack even when the call itself succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,

    /// Human readable failure cause, empty on success
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cause: String,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            cause: String::new(),
        }
    }

    pub fn failure(cause: impl Into<String>) -> Self {
        Self {
            success: false,
            cause: cause.into(),
        }
    }
}
