//! E2SM-RSM v1 information elements used in control procedures.
//!
//! Field tags follow the `e2sm_rsm` protobuf schema; only the elements the
//! controller emits are modelled.

use prost::{Enumeration, Message, Oneof};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum E2SmRsmCommand {
    SliceCreate = 0,
    SliceUpdate = 1,
    SliceDelete = 2,
    UeAssociate = 3,
    EventTriggers = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum SchedulerType {
    RoundRobin = 0,
    ProportionallyFair = 1,
    QosBased = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Enumeration)]
#[repr(i32)]
pub enum SliceType {
    DlSlice = 0,
    UlSlice = 1,
}

#[derive(Clone, PartialEq, Message)]
pub struct E2SmRsmControlHeader {
    /// Explicit presence so a slice-create header is never empty on the wire
    #[prost(enumeration = "E2SmRsmCommand", optional, tag = "1")]
    pub rsm_command: Option<i32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct E2SmRsmControlMessage {
    #[prost(oneof = "e2_sm_rsm_control_message::Message", tags = "1, 2, 3, 4")]
    pub message: Option<e2_sm_rsm_control_message::Message>,
}

pub mod e2_sm_rsm_control_message {
    use prost::Oneof;

    #[derive(Clone, PartialEq, Oneof)]
    pub enum Message {
        #[prost(message, tag = "1")]
        SliceCreate(super::SliceConfig),
        #[prost(message, tag = "2")]
        SliceUpdate(super::SliceConfig),
        #[prost(message, tag = "3")]
        SliceDelete(super::SliceDelete),
        #[prost(message, tag = "4")]
        SliceAssociate(super::SliceAssociate),
    }
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceConfig {
    #[prost(message, optional, tag = "1")]
    pub slice_id: Option<SliceId>,
    #[prost(message, optional, tag = "2")]
    pub slice_config_parameters: Option<SliceParameters>,
    #[prost(enumeration = "SliceType", tag = "3")]
    pub slice_type: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceId {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceParameters {
    #[prost(enumeration = "SchedulerType", tag = "1")]
    pub scheduler_type: i32,
    #[prost(int32, optional, tag = "2")]
    pub weight: Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub qos_level: Option<i32>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceDelete {
    #[prost(message, optional, tag = "1")]
    pub slice_id: Option<SliceId>,
    #[prost(enumeration = "SliceType", tag = "2")]
    pub slice_type: i32,
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceAssociate {
    #[prost(message, optional, tag = "1")]
    pub ue_id: Option<UeIdentity>,
    #[prost(message, repeated, tag = "2")]
    pub bearer_id: Vec<BearerId>,
    #[prost(message, optional, tag = "3")]
    pub down_link_slice_id: Option<SliceIdassoc>,
    #[prost(message, optional, tag = "4")]
    pub uplink_slice_id: Option<SliceIdassoc>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SliceIdassoc {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct UeIdentity {
    #[prost(oneof = "UeIdentityKind", tags = "1, 2")]
    pub ue_identity: Option<UeIdentityKind>,
}

#[derive(Clone, PartialEq, Oneof)]
pub enum UeIdentityKind {
    #[prost(message, tag = "1")]
    CuUeF1apId(CuUeF1apId),
    #[prost(message, tag = "2")]
    DuUeF1apId(DuUeF1apId),
}

#[derive(Clone, PartialEq, Message)]
pub struct CuUeF1apId {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct DuUeF1apId {
    #[prost(int64, tag = "1")]
    pub value: i64,
}

#[derive(Clone, PartialEq, Message)]
pub struct BearerId {
    #[prost(oneof = "BearerIdKind", tags = "1")]
    pub bearer_id: Option<BearerIdKind>,
}

#[derive(Clone, PartialEq, Oneof)]
pub enum BearerIdKind {
    #[prost(message, tag = "1")]
    DrbId(DrbId),
}

#[derive(Clone, PartialEq, Message)]
pub struct DrbId {
    #[prost(oneof = "DrbIdKind", tags = "2")]
    pub drb_id: Option<DrbIdKind>,
}

#[derive(Clone, PartialEq, Oneof)]
pub enum DrbIdKind {
    #[prost(message, tag = "2")]
    FourGdrbId(FourGDrbId),
}

#[derive(Clone, PartialEq, Message)]
pub struct FourGDrbId {
    #[prost(int32, tag = "1")]
    pub value: i32,
    #[prost(message, optional, tag = "2")]
    pub qci: Option<Qci>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Qci {
    #[prost(int32, tag = "1")]
    pub value: i32,
}
