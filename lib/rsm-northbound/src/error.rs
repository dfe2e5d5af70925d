use rsm_core::{RoutingError, ValidationError};
use rsm_e2::EncodingError;
use thiserror::Error;

/// Failure of a northbound operation; the display text is the ack cause
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RsmError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("failed to create the control message - {0}")]
    Encoding(#[from] EncodingError),

    #[error("failed to route the control message - {0}")]
    Routing(#[from] RoutingError),

    #[error("not implemented yet")]
    NotImplemented,
}

impl RsmError {
    /// Outcome label used in request metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            RsmError::Validation(_) => "invalid",
            RsmError::Encoding(_) => "encoding_failed",
            RsmError::Routing(_) => "routing_failed",
            RsmError::NotImplemented => "not_implemented",
        }
    }
}
