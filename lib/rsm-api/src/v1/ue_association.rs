use serde::{Deserialize, Serialize};

use super::Ack;

wire_enum! {
    /// Kind of UE identifier carried in an association request
    UeIdType {
        CuUeF1apId = ("UE_ID_TYPE_CU_UE_F1_AP_ID", 0),
        DuUeF1apId = ("UE_ID_TYPE_DU_UE_F1_AP_ID", 1),
        RanUeNgapId = ("UE_ID_TYPE_RAN_UE_NGAP_ID", 2),
        AmfUeNgapId = ("UE_ID_TYPE_AMF_UE_NGAP_ID", 3),
        EnbUeS1apId = ("UE_ID_TYPE_ENB_UE_S1AP_ID", 4),
    }
}

/// One identifier of a UE
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UeId {
    /// Decimal identifier value
    pub ue_id: String,
    #[serde(rename = "type")]
    pub id_type: UeIdType,
}

impl UeId {
    pub fn new(ue_id: impl Into<String>, id_type: UeIdType) -> Self {
        Self {
            ue_id: ue_id.into(),
            id_type,
        }
    }
}

/// Associates a UE with a downlink slice and, optionally, an uplink slice
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SetUeSliceAssociationRequest {
    pub e2_node_id: String,
    pub ue_id: Vec<UeId>,
    pub dl_slice_id: String,
    /// Empty when the UE keeps its uplink slice
    pub ul_slice_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SetUeSliceAssociationResponse {
    pub ack: Ack,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetUeSliceAssociationRequest {
    pub e2_node_id: String,
    pub ue_id: Option<UeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UeSliceAssociation {
    pub ue_id: Vec<UeId>,
    pub dl_slice_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ul_slice_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUeSliceAssociationResponse {
    pub ack: Ack,
    #[serde(default)]
    pub ue_slice_association: Vec<UeSliceAssociation>,
}
