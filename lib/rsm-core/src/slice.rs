//! Typed slice model

use std::fmt;

/// RSM control command; selects the payload shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SliceCommand {
    Create,
    Update,
    Delete,
    AssociateUe,
    /// Defined by the service model but not supported by this controller
    EventTriggers,
}

impl SliceCommand {
    /// Raw `E2SmRsmCommand` value
    pub fn as_i32(self) -> i32 {
        match self {
            SliceCommand::Create => 0,
            SliceCommand::Update => 1,
            SliceCommand::Delete => 2,
            SliceCommand::AssociateUe => 3,
            SliceCommand::EventTriggers => 4,
        }
    }
}

impl TryFrom<i32> for SliceCommand {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SliceCommand::Create),
            1 => Ok(SliceCommand::Update),
            2 => Ok(SliceCommand::Delete),
            3 => Ok(SliceCommand::AssociateUe),
            4 => Ok(SliceCommand::EventTriggers),
            other => Err(other),
        }
    }
}

impl fmt::Display for SliceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SliceCommand::Create => "E2_SM_RSM_COMMAND_SLICE_CREATE",
            SliceCommand::Update => "E2_SM_RSM_COMMAND_SLICE_UPDATE",
            SliceCommand::Delete => "E2_SM_RSM_COMMAND_SLICE_DELETE",
            SliceCommand::AssociateUe => "E2_SM_RSM_COMMAND_UE_ASSOCIATE",
            SliceCommand::EventTriggers => "E2_SM_RSM_COMMAND_EVENT_TRIGGERS",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SliceType {
    #[default]
    DownlinkSlice,
    UplinkSlice,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SchedulerType {
    #[default]
    RoundRobin,
    ProportionallyFair,
    QosBased,
}

/// Slice parameters used by create, update and delete
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceConfig {
    pub slice_id: i64,
    pub scheduler_type: SchedulerType,
    pub weight: i32,
    pub slice_type: SliceType,
}

impl SliceConfig {
    /// A delete only identifies the slice; scheduling parameters are left at defaults
    pub fn for_delete(slice_id: i64, slice_type: SliceType) -> Self {
        Self {
            slice_id,
            scheduler_type: SchedulerType::default(),
            weight: 0,
            slice_type,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UeIdentity {
    DuUeF1apId(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BearerId {
    /// 4G data radio bearer with its QCI
    FourGDrb { drb_id: i32, qci: i32 },
}

/// Bearer attached to every association until requests can carry their own
pub const DEFAULT_BEARER: BearerId = BearerId::FourGDrb { drb_id: 1, qci: 1 };

/// UE to slice association
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SliceAssociation {
    pub downlink_slice_id: i64,
    pub uplink_slice_id: Option<i64>,
    pub ue_identity: UeIdentity,
    pub bearer_ids: Vec<BearerId>,
}
