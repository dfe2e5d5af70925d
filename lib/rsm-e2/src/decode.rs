//! Decoding of encoded control requests back into the typed model.
//!
//! Used by control sessions to describe what they forward and by tests to
//! check that encoding loses nothing.

use prost::Message;
use rsm_core::{
    BearerId, ControlMessage, SchedulerType, SliceAssociation, SliceCommand, SliceConfig,
    SliceType, UeIdentity,
};

use crate::e2sm_rsm::{self as pb, e2_sm_rsm_control_message::Message as Payload};
use crate::EncodingError;

/// Typed view of a control message payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlPayload {
    SliceCreate(SliceConfig),
    SliceUpdate(SliceConfig),
    SliceDelete { slice_id: i64, slice_type: SliceType },
    SliceAssociate(SliceAssociation),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedControl {
    pub command: SliceCommand,
    pub payload: ControlPayload,
}

/// Read the command out of an encoded control header.
///
/// An absent command is the proto3 default, SLICE_CREATE.
pub fn decode_command(header: &[u8]) -> Result<SliceCommand, EncodingError> {
    let header = pb::E2SmRsmControlHeader::decode(header)?;
    let raw = header.rsm_command.unwrap_or_default();
    SliceCommand::try_from(raw).map_err(EncodingError::UnknownCommand)
}

pub fn decode_control_message(message: &ControlMessage) -> Result<DecodedControl, EncodingError> {
    let command = decode_command(message.header())?;
    let payload = pb::E2SmRsmControlMessage::decode(message.payload().clone())?
        .message
        .ok_or_else(|| EncodingError::Malformed("empty control message".to_string()))?;

    let payload = match payload {
        Payload::SliceCreate(config) => ControlPayload::SliceCreate(slice_config(&config)?),
        Payload::SliceUpdate(config) => ControlPayload::SliceUpdate(slice_config(&config)?),
        Payload::SliceDelete(delete) => ControlPayload::SliceDelete {
            slice_id: delete.slice_id.map(|id| id.value).unwrap_or_default(),
            slice_type: slice_type(delete.slice_type)?,
        },
        Payload::SliceAssociate(associate) => {
            ControlPayload::SliceAssociate(slice_association(&associate)?)
        }
    };

    Ok(DecodedControl { command, payload })
}

fn slice_type(raw: i32) -> Result<SliceType, EncodingError> {
    match pb::SliceType::try_from(raw) {
        Ok(pb::SliceType::DlSlice) => Ok(SliceType::DownlinkSlice),
        Ok(pb::SliceType::UlSlice) => Ok(SliceType::UplinkSlice),
        Err(_) => Err(EncodingError::Malformed(format!("slice type {}", raw))),
    }
}

fn scheduler_type(raw: i32) -> Result<SchedulerType, EncodingError> {
    match pb::SchedulerType::try_from(raw) {
        Ok(pb::SchedulerType::RoundRobin) => Ok(SchedulerType::RoundRobin),
        Ok(pb::SchedulerType::ProportionallyFair) => Ok(SchedulerType::ProportionallyFair),
        Ok(pb::SchedulerType::QosBased) => Ok(SchedulerType::QosBased),
        Err(_) => Err(EncodingError::Malformed(format!("scheduler type {}", raw))),
    }
}

fn slice_config(config: &pb::SliceConfig) -> Result<SliceConfig, EncodingError> {
    let parameters = config
        .slice_config_parameters
        .as_ref()
        .ok_or_else(|| EncodingError::Malformed("slice config without parameters".to_string()))?;

    Ok(SliceConfig {
        slice_id: config.slice_id.as_ref().map(|id| id.value).unwrap_or_default(),
        scheduler_type: scheduler_type(parameters.scheduler_type)?,
        weight: parameters.weight.unwrap_or_default(),
        slice_type: slice_type(config.slice_type)?,
    })
}

fn slice_association(associate: &pb::SliceAssociate) -> Result<SliceAssociation, EncodingError> {
    let ue_identity = match associate.ue_id.as_ref().and_then(|id| id.ue_identity.as_ref()) {
        Some(pb::UeIdentityKind::DuUeF1apId(id)) => UeIdentity::DuUeF1apId(id.value),
        Some(pb::UeIdentityKind::CuUeF1apId(_)) | None => {
            return Err(EncodingError::Malformed(
                "slice association without du-ue-f1ap-id".to_string(),
            ))
        }
    };

    let bearer_ids = associate
        .bearer_id
        .iter()
        .map(bearer_id)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SliceAssociation {
        downlink_slice_id: associate
            .down_link_slice_id
            .as_ref()
            .map(|id| id.value)
            .unwrap_or_default(),
        uplink_slice_id: associate.uplink_slice_id.as_ref().map(|id| id.value),
        ue_identity,
        bearer_ids,
    })
}

fn bearer_id(bearer: &pb::BearerId) -> Result<BearerId, EncodingError> {
    match &bearer.bearer_id {
        Some(pb::BearerIdKind::DrbId(pb::DrbId {
            drb_id: Some(pb::DrbIdKind::FourGdrbId(drb)),
        })) => Ok(BearerId::FourGDrb {
            drb_id: drb.value,
            qci: drb.qci.as_ref().map(|qci| qci.value).unwrap_or_default(),
        }),
        _ => Err(EncodingError::Malformed("unsupported bearer id".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_garbage() {
        let message = ControlMessage::new(vec![0x08, 0x01], vec![0x0a, 0xff]);
        assert!(matches!(
            decode_control_message(&message),
            Err(EncodingError::Decode(_))
        ));
    }

    #[test]
    fn test_empty_header_is_create() {
        assert_eq!(decode_command(&[]), Ok(SliceCommand::Create));
        // Explicit presence still decodes to the same command
        assert_eq!(decode_command(&[0x08, 0x00]), Ok(SliceCommand::Create));
    }

    #[test]
    fn test_decode_unknown_command() {
        assert_eq!(
            decode_command(&[0x08, 0x09]),
            Err(EncodingError::UnknownCommand(9))
        );
    }
}
