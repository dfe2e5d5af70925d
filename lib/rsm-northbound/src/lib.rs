//! Northbound slice management API
//!
//! This library provides:
//! - `RsmService`: validate, encode and route each RSM operation, answering
//!   with an in-band ack
//! - The JSON-over-HTTP binding of the operations
//! - Prometheus metrics for requests and routing

pub mod service;
pub mod http;
pub mod metrics;
pub mod error;

pub use service::{Operation, RsmService};
pub use http::handle;
pub use metrics::RsmMetrics;
pub use error::RsmError;
