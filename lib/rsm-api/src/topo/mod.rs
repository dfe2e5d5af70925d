/// Bindings to the R-NIB topology objects
///
/// This module provides type-safe Rust bindings to the topology entities,
/// relations and aspects the slice manager reads from the R-NIB: E2 nodes,
/// their cells, and the RSM slicing capability descriptors they advertise.

pub mod object;
pub mod e2node;
pub mod rsm;

pub use object::{Entity, Event, EventType, Filters, Object, ObjectKind, Relation, RelationFilter};
pub use e2node::{E2Cell, E2Node, RanFunction, ServiceModelInfo};
pub use rsm::{
    RsmNodeSlicingCapabilityItem, RsmRanFunction, RsmSlicingType, RsmSupportedSlicingConfigItem,
    RSM_RAN_FUNCTION_TYPE_URL,
};

/// Identifier of a topology object
pub type Id = String;

/// Relation kind: the application controls the target E2 node
pub const CONTROLS: &str = "controls";
/// Relation kind: an E2 node contains the target cell
pub const CONTAINS: &str = "contains";
/// Entity kind of an E2 node
pub const E2NODE: &str = "e2node";
/// Entity kind of an E2 cell
pub const E2CELL: &str = "e2cell";
