//! RSM northbound API types and R-NIB topology bindings
//!
//! This library defines the data exchanged at the edges of the slice manager:
//! - v1: slice and UE-association requests, responses and the `Ack` result
//! - topo: the topology objects, filters and events consumed from the R-NIB

pub mod v1;
pub mod topo;

pub use v1::{
    Ack, CreateSliceRequest, CreateSliceResponse, DeleteSliceRequest, DeleteSliceResponse,
    GetSliceResponse, GetSlicesRequest, GetUeSliceAssociationRequest,
    GetUeSliceAssociationResponse, SchedulerType, SetUeSliceAssociationRequest,
    SetUeSliceAssociationResponse, SliceType, UeId, UeIdType, UpdateSliceRequest,
    UpdateSliceResponse,
};
