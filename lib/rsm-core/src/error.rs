use std::num::ParseIntError;
use thiserror::Error;

/// A northbound request could not be turned into typed slice parameters.
///
/// The display text is the cause reported back in the ack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("failed to convert slice id to int - {0}")]
    InvalidSliceId(ParseIntError),

    #[error("failed to convert weight to int - {0}")]
    InvalidWeight(ParseIntError),

    #[error("failed to convert ue id to int - {0}")]
    InvalidUeId(ParseIntError),

    #[error("need du-ue-f1ap-id")]
    MissingDuUeF1apId,

    #[error("unrecognized scheduler type {0}")]
    UnrecognizedSchedulerType(String),

    #[error("unrecognized slice type {0}")]
    UnrecognizedSliceType(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("unknown e2 node: {0}")]
    UnknownNode(String),

    #[error("timed out handing control message to e2 node {0}")]
    SendTimeout(String),

    #[error("control channel closed for e2 node {0}")]
    ChannelClosed(String),

    #[error("e2 node already attached: {0}")]
    NodeAlreadyAttached(String),
}
