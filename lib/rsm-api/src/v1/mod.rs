/// API version v1 for the RSM northbound interface

#[macro_use]
mod wire;
pub mod ack;
pub mod slice;
pub mod ue_association;

pub use ack::Ack;
pub use slice::{
    CreateSliceRequest, CreateSliceResponse, DeleteSliceRequest, DeleteSliceResponse,
    GetSliceResponse, GetSlicesRequest, SchedulerType, SliceItem, SliceType,
    UpdateSliceRequest, UpdateSliceResponse,
};
pub use ue_association::{
    GetUeSliceAssociationRequest, GetUeSliceAssociationResponse, SetUeSliceAssociationRequest,
    SetUeSliceAssociationResponse, UeId, UeIdType, UeSliceAssociation,
};
