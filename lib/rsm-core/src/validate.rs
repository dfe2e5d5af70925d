//! Conversion of northbound requests into typed slice parameters.
//!
//! Numeric fields are checked in request order and the first failure is
//! returned; nothing after it is looked at.

use rsm_api::v1 as api;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;
use crate::slice::{
    SchedulerType, SliceAssociation, SliceConfig, SliceType, UeIdentity, DEFAULT_BEARER,
};

/// What to do with an enum wire value this build does not recognize
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumPolicy {
    /// Use the default variant (round robin, downlink) and log a warning
    #[default]
    Coerce,
    /// Fail validation
    Reject,
}

/// Validates and normalizes RSM requests
#[derive(Clone, Debug, Default)]
pub struct RequestValidator {
    policy: EnumPolicy,
}

impl RequestValidator {
    pub fn new(policy: EnumPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> EnumPolicy {
        self.policy
    }

    pub fn create_slice(
        &self,
        request: &api::CreateSliceRequest,
    ) -> Result<SliceConfig, ValidationError> {
        self.slice_config(
            &request.slice_id,
            &request.weight,
            &request.scheduler_type,
            &request.slice_type,
        )
    }

    pub fn update_slice(
        &self,
        request: &api::UpdateSliceRequest,
    ) -> Result<SliceConfig, ValidationError> {
        self.slice_config(
            &request.slice_id,
            &request.weight,
            &request.scheduler_type,
            &request.slice_type,
        )
    }

    pub fn delete_slice(
        &self,
        request: &api::DeleteSliceRequest,
    ) -> Result<SliceConfig, ValidationError> {
        let slice_id = parse_slice_id(&request.slice_id)?;
        let slice_type = self.slice_type(&request.slice_type)?;
        Ok(SliceConfig::for_delete(slice_id, slice_type))
    }

    /// Build a full slice configuration: slice id, then weight, then enums
    pub fn slice_config(
        &self,
        slice_id: &str,
        weight: &str,
        scheduler_type: &api::SchedulerType,
        slice_type: &api::SliceType,
    ) -> Result<SliceConfig, ValidationError> {
        let slice_id = parse_slice_id(slice_id)?;
        let weight = weight
            .parse::<i32>()
            .map_err(ValidationError::InvalidWeight)?;
        let scheduler_type = self.scheduler_type(scheduler_type)?;
        let slice_type = self.slice_type(slice_type)?;

        Ok(SliceConfig {
            slice_id,
            scheduler_type,
            weight,
            slice_type,
        })
    }

    /// Build a UE association.
    ///
    /// Every `DU-UE-F1AP-ID` entry is parsed in order and the last one wins.
    pub fn ue_slice_association(
        &self,
        request: &api::SetUeSliceAssociationRequest,
    ) -> Result<SliceAssociation, ValidationError> {
        let downlink_slice_id = parse_slice_id(&request.dl_slice_id)?;
        let uplink_slice_id = if request.ul_slice_id.is_empty() {
            None
        } else {
            Some(parse_slice_id(&request.ul_slice_id)?)
        };

        let mut du_ue_f1ap_id = None;
        for ue_id in &request.ue_id {
            if ue_id.id_type == api::UeIdType::DuUeF1apId {
                let id = ue_id
                    .ue_id
                    .parse::<i64>()
                    .map_err(ValidationError::InvalidUeId)?;
                du_ue_f1ap_id = Some(id);
            }
        }
        let du_ue_f1ap_id = du_ue_f1ap_id.ok_or(ValidationError::MissingDuUeF1apId)?;

        Ok(SliceAssociation {
            downlink_slice_id,
            uplink_slice_id,
            ue_identity: UeIdentity::DuUeF1apId(du_ue_f1ap_id),
            bearer_ids: vec![DEFAULT_BEARER],
        })
    }

    pub fn scheduler_type(
        &self,
        wire: &api::SchedulerType,
    ) -> Result<SchedulerType, ValidationError> {
        match wire {
            api::SchedulerType::RoundRobin => Ok(SchedulerType::RoundRobin),
            api::SchedulerType::ProportionallyFair => Ok(SchedulerType::ProportionallyFair),
            api::SchedulerType::QosBased => Ok(SchedulerType::QosBased),
            api::SchedulerType::Unrecognized(raw) => match self.policy {
                EnumPolicy::Coerce => {
                    warn!("Unrecognized scheduler type {}, using round robin", raw);
                    Ok(SchedulerType::RoundRobin)
                }
                EnumPolicy::Reject => Err(ValidationError::UnrecognizedSchedulerType(raw.clone())),
            },
        }
    }

    pub fn slice_type(&self, wire: &api::SliceType) -> Result<SliceType, ValidationError> {
        match wire {
            api::SliceType::DlSlice => Ok(SliceType::DownlinkSlice),
            api::SliceType::UlSlice => Ok(SliceType::UplinkSlice),
            api::SliceType::Unrecognized(raw) => match self.policy {
                EnumPolicy::Coerce => {
                    warn!("Unrecognized slice type {}, using downlink", raw);
                    Ok(SliceType::DownlinkSlice)
                }
                EnumPolicy::Reject => Err(ValidationError::UnrecognizedSliceType(raw.clone())),
            },
        }
    }
}

fn parse_slice_id(value: &str) -> Result<i64, ValidationError> {
    value.parse::<i64>().map_err(ValidationError::InvalidSliceId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::BearerId;

    fn create_request(slice_id: &str, weight: &str) -> api::CreateSliceRequest {
        api::CreateSliceRequest {
            e2_node_id: "node-1".to_string(),
            slice_id: slice_id.to_string(),
            scheduler_type: api::SchedulerType::RoundRobin,
            weight: weight.to_string(),
            slice_type: api::SliceType::DlSlice,
        }
    }

    fn du_ue(id: &str) -> api::UeId {
        api::UeId::new(id, api::UeIdType::DuUeF1apId)
    }

    #[test]
    fn test_create_slice_valid() {
        let config = RequestValidator::default()
            .create_slice(&create_request("5", "20"))
            .unwrap();
        assert_eq!(
            config,
            SliceConfig {
                slice_id: 5,
                scheduler_type: SchedulerType::RoundRobin,
                weight: 20,
                slice_type: SliceType::DownlinkSlice,
            }
        );
    }

    #[test]
    fn test_slice_id_checked_before_weight() {
        let err = RequestValidator::default()
            .create_slice(&create_request("abc", "also-bad"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSliceId(_)));
        assert!(err
            .to_string()
            .starts_with("failed to convert slice id to int - "));
        assert!(!err.to_string().contains("weight"));
    }

    #[test]
    fn test_invalid_weight() {
        let err = RequestValidator::default()
            .create_slice(&create_request("1", "ten"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to convert weight to int - invalid digit found in string"
        );
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = RequestValidator::default()
            .create_slice(&create_request("1", "4294967296"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidWeight(_)));
    }

    #[test]
    fn test_coerce_policy_defaults_unknown_enums() {
        let mut request = create_request("1", "10");
        request.scheduler_type = api::SchedulerType::Unrecognized("42".to_string());
        request.slice_type = api::SliceType::Unrecognized("SLICE_TYPE_SIDELINK".to_string());

        let config = RequestValidator::new(EnumPolicy::Coerce)
            .create_slice(&request)
            .unwrap();
        assert_eq!(config.scheduler_type, SchedulerType::RoundRobin);
        assert_eq!(config.slice_type, SliceType::DownlinkSlice);
    }

    #[test]
    fn test_reject_policy_fails_unknown_enums() {
        let validator = RequestValidator::new(EnumPolicy::Reject);

        let mut request = create_request("1", "10");
        request.scheduler_type = api::SchedulerType::Unrecognized("42".to_string());
        assert_eq!(
            validator.create_slice(&request).unwrap_err(),
            ValidationError::UnrecognizedSchedulerType("42".to_string())
        );

        let mut request = create_request("1", "10");
        request.slice_type = api::SliceType::Unrecognized("7".to_string());
        assert_eq!(
            validator.create_slice(&request).unwrap_err().to_string(),
            "unrecognized slice type 7"
        );
    }

    #[test]
    fn test_delete_ignores_scheduler_fields() {
        let request = api::DeleteSliceRequest {
            e2_node_id: "node-1".to_string(),
            slice_id: "9".to_string(),
            slice_type: api::SliceType::UlSlice,
        };
        let config = RequestValidator::default().delete_slice(&request).unwrap();
        assert_eq!(config, SliceConfig::for_delete(9, SliceType::UplinkSlice));
    }

    #[test]
    fn test_association_requires_du_ue_f1ap_id() {
        let request = api::SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![api::UeId::new("3", api::UeIdType::RanUeNgapId)],
            dl_slice_id: "1".to_string(),
            ul_slice_id: String::new(),
        };
        let err = RequestValidator::default()
            .ue_slice_association(&request)
            .unwrap_err();
        assert_eq!(err.to_string(), "need du-ue-f1ap-id");
    }

    #[test]
    fn test_association_last_du_ue_id_wins() {
        let request = api::SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![
                du_ue("11"),
                api::UeId::new("99", api::UeIdType::CuUeF1apId),
                du_ue("12"),
            ],
            dl_slice_id: "1".to_string(),
            ul_slice_id: "2".to_string(),
        };
        let assoc = RequestValidator::default()
            .ue_slice_association(&request)
            .unwrap();
        assert_eq!(assoc.ue_identity, UeIdentity::DuUeF1apId(12));
        assert_eq!(assoc.downlink_slice_id, 1);
        assert_eq!(assoc.uplink_slice_id, Some(2));
        assert_eq!(
            assoc.bearer_ids,
            vec![BearerId::FourGDrb { drb_id: 1, qci: 1 }]
        );
    }

    #[test]
    fn test_association_empty_uplink_is_absent() {
        let request = api::SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![du_ue("5")],
            dl_slice_id: "3".to_string(),
            ul_slice_id: String::new(),
        };
        let assoc = RequestValidator::default()
            .ue_slice_association(&request)
            .unwrap();
        assert_eq!(assoc.uplink_slice_id, None);
    }

    #[test]
    fn test_association_bad_ids() {
        let validator = RequestValidator::default();
        let mut request = api::SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![du_ue("x")],
            dl_slice_id: "1".to_string(),
            ul_slice_id: "up".to_string(),
        };
        assert!(matches!(
            validator.ue_slice_association(&request).unwrap_err(),
            ValidationError::InvalidSliceId(_)
        ));

        request.ul_slice_id = String::new();
        assert!(validator
            .ue_slice_association(&request)
            .unwrap_err()
            .to_string()
            .starts_with("failed to convert ue id to int - "));
    }
}
