use serde::{Deserialize, Serialize};

use super::Ack;

wire_enum! {
    /// Scheduler requested for a slice
    SchedulerType {
        RoundRobin = ("SCHEDULER_TYPE_ROUND_ROBIN", 0),
        ProportionallyFair = ("SCHEDULER_TYPE_PROPORTIONALLY_FAIR", 1),
        QosBased = ("SCHEDULER_TYPE_QOS_BASED", 2),
    }
}

wire_enum! {
    /// Direction of a slice
    SliceType {
        DlSlice = ("SLICE_TYPE_DL_SLICE", 0),
        UlSlice = ("SLICE_TYPE_UL_SLICE", 1),
    }
}

/// Request to create a slice on an E2 node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSliceRequest {
    pub e2_node_id: String,
    /// Decimal slice identifier
    pub slice_id: String,
    pub scheduler_type: SchedulerType,
    /// Decimal relative weight
    pub weight: String,
    pub slice_type: SliceType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSliceResponse {
    pub ack: Ack,
}

/// Request to update an existing slice; same shape as a create
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSliceRequest {
    pub e2_node_id: String,
    pub slice_id: String,
    pub scheduler_type: SchedulerType,
    pub weight: String,
    pub slice_type: SliceType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSliceResponse {
    pub ack: Ack,
}

/// Request to delete a slice; only the id and direction identify it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteSliceRequest {
    pub e2_node_id: String,
    pub slice_id: String,
    pub slice_type: SliceType,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteSliceResponse {
    pub ack: Ack,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetSlicesRequest {
    pub e2_node_id: String,
}

/// Slices known for one E2 node
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceItem {
    pub e2_node_id: String,
    #[serde(default)]
    pub slice_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSliceResponse {
    pub ack: Ack,
    #[serde(default)]
    pub slice_items: Vec<SliceItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_from_names() {
        let req: CreateSliceRequest = serde_json::from_str(
            r#"{"e2NodeId":"node-1","sliceId":"5","weight":"20",
                "schedulerType":"SCHEDULER_TYPE_QOS_BASED","sliceType":"SLICE_TYPE_UL_SLICE"}"#,
        )
        .unwrap();
        assert_eq!(req.e2_node_id, "node-1");
        assert_eq!(req.slice_id, "5");
        assert_eq!(req.scheduler_type, SchedulerType::QosBased);
        assert_eq!(req.slice_type, SliceType::UlSlice);
    }

    #[test]
    fn test_enum_from_numbers() {
        let req: CreateSliceRequest =
            serde_json::from_str(r#"{"schedulerType":1,"sliceType":0}"#).unwrap();
        assert_eq!(req.scheduler_type, SchedulerType::ProportionallyFair);
        assert_eq!(req.slice_type, SliceType::DlSlice);
    }

    #[test]
    fn test_unknown_enum_values_are_kept() {
        let req: CreateSliceRequest =
            serde_json::from_str(r#"{"schedulerType":"SCHEDULER_TYPE_EDF","sliceType":7}"#)
                .unwrap();
        assert_eq!(
            req.scheduler_type,
            SchedulerType::Unrecognized("SCHEDULER_TYPE_EDF".to_string())
        );
        assert_eq!(req.slice_type, SliceType::Unrecognized("7".to_string()));
        assert!(!req.slice_type.is_recognized());
    }

    #[test]
    fn test_missing_fields_default() {
        let req: DeleteSliceRequest = serde_json::from_str(r#"{"sliceId":"3"}"#).unwrap();
        assert_eq!(req.e2_node_id, "");
        assert_eq!(req.slice_type, SliceType::DlSlice);
    }

    #[test]
    fn test_ack_serialization_omits_empty_cause() {
        let resp = CreateSliceResponse { ack: Ack::ok() };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"ack":{"success":true}}"#
        );
    }
}
