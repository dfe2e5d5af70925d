//! Core slice-management functionality
//!
//! This library provides:
//! - The typed slice / UE-association model handed to the E2 encoder
//! - Validation of northbound requests into that model
//! - The per-node control channel registry and the request router

pub mod slice;
pub mod control;
pub mod validate;
pub mod registry;
pub mod router;
pub mod error;

pub use slice::{
    BearerId, SchedulerType, SliceAssociation, SliceCommand, SliceConfig, SliceType, UeIdentity,
};
pub use control::ControlMessage;
pub use validate::{EnumPolicy, RequestValidator};
pub use registry::NodeChannelRegistry;
pub use router::RequestRouter;
pub use error::{RoutingError, ValidationError};
