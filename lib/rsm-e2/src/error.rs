use rsm_core::SliceCommand;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("Unsupported message type ({0})")]
    UnsupportedCommand(SliceCommand),

    #[error("wrong E2SmRsmCommand type ({0})")]
    UnknownCommand(i32),

    #[error("{command} requires a {parameter}")]
    MissingParameters {
        command: SliceCommand,
        parameter: &'static str,
    },

    #[error("failed to decode control message: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("malformed control message: {0}")]
    Malformed(String),
}
