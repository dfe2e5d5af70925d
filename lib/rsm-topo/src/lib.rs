//! R-NIB topology access
pub mod store;
pub mod rnib;
pub mod error;

pub use store::{InMemoryTopo, TopoService};
pub use rnib::RnibClient;
pub use error::TopologyError;
