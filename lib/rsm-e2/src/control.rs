//! Construction of E2SM-RSM control requests

use prost::Message;
use rsm_core::{
    BearerId, ControlMessage, SchedulerType, SliceAssociation, SliceCommand, SliceConfig,
    SliceType, UeIdentity,
};
use tracing::error;

use crate::e2sm_rsm::{self as pb, e2_sm_rsm_control_message};
use crate::EncodingError;

/// Builds control requests for the RSM service model.
///
/// Encoding is a pure function of its inputs: the same command and
/// parameters always produce the same header and payload bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlMessageHandler;

impl ControlMessageHandler {
    pub fn new() -> Self {
        Self
    }

    /// Build the header and payload for a command
    pub fn create_control_request(
        &self,
        command: SliceCommand,
        slice_config: Option<&SliceConfig>,
        slice_association: Option<&SliceAssociation>,
    ) -> Result<ControlMessage, EncodingError> {
        let header = self.create_control_header(command);
        let payload = self.create_control_payload(command, slice_config, slice_association)?;
        Ok(ControlMessage::new(header, payload))
    }

    /// Same as `create_control_request` for a raw `E2SmRsmCommand` value
    pub fn create_control_request_raw(
        &self,
        command: i32,
        slice_config: Option<&SliceConfig>,
        slice_association: Option<&SliceAssociation>,
    ) -> Result<ControlMessage, EncodingError> {
        let command = SliceCommand::try_from(command).map_err(|raw| {
            let err = EncodingError::UnknownCommand(raw);
            error!("{}", err);
            err
        })?;
        self.create_control_request(command, slice_config, slice_association)
    }

    /// The header only carries the command
    pub fn create_control_header(&self, command: SliceCommand) -> Vec<u8> {
        pb::E2SmRsmControlHeader {
            rsm_command: Some(rsm_command(command) as i32),
        }
        .encode_to_vec()
    }

    pub fn create_control_payload(
        &self,
        command: SliceCommand,
        slice_config: Option<&SliceConfig>,
        slice_association: Option<&SliceAssociation>,
    ) -> Result<Vec<u8>, EncodingError> {
        use e2_sm_rsm_control_message::Message as Payload;

        let payload = match command {
            SliceCommand::Create => {
                Payload::SliceCreate(slice_config_ie(require_config(command, slice_config)?))
            }
            SliceCommand::Update => {
                Payload::SliceUpdate(slice_config_ie(require_config(command, slice_config)?))
            }
            SliceCommand::Delete => {
                let config = require_config(command, slice_config)?;
                Payload::SliceDelete(pb::SliceDelete {
                    slice_id: Some(pb::SliceId {
                        value: config.slice_id,
                    }),
                    slice_type: slice_type_ie(config.slice_type) as i32,
                })
            }
            SliceCommand::AssociateUe => {
                let association =
                    slice_association.ok_or(EncodingError::MissingParameters {
                        command,
                        parameter: "slice association",
                    })?;
                Payload::SliceAssociate(slice_associate_ie(association))
            }
            SliceCommand::EventTriggers => {
                // TODO: encode event trigger definitions once an E2 node advertises support
                let err = EncodingError::UnsupportedCommand(command);
                error!("{}", err);
                return Err(err);
            }
        };

        Ok(pb::E2SmRsmControlMessage {
            message: Some(payload),
        }
        .encode_to_vec())
    }
}

fn require_config(
    command: SliceCommand,
    slice_config: Option<&SliceConfig>,
) -> Result<&SliceConfig, EncodingError> {
    slice_config.ok_or(EncodingError::MissingParameters {
        command,
        parameter: "slice config",
    })
}

fn rsm_command(command: SliceCommand) -> pb::E2SmRsmCommand {
    match command {
        SliceCommand::Create => pb::E2SmRsmCommand::SliceCreate,
        SliceCommand::Update => pb::E2SmRsmCommand::SliceUpdate,
        SliceCommand::Delete => pb::E2SmRsmCommand::SliceDelete,
        SliceCommand::AssociateUe => pb::E2SmRsmCommand::UeAssociate,
        SliceCommand::EventTriggers => pb::E2SmRsmCommand::EventTriggers,
    }
}

fn scheduler_type_ie(scheduler_type: SchedulerType) -> pb::SchedulerType {
    match scheduler_type {
        SchedulerType::RoundRobin => pb::SchedulerType::RoundRobin,
        SchedulerType::ProportionallyFair => pb::SchedulerType::ProportionallyFair,
        SchedulerType::QosBased => pb::SchedulerType::QosBased,
    }
}

fn slice_type_ie(slice_type: SliceType) -> pb::SliceType {
    match slice_type {
        SliceType::DownlinkSlice => pb::SliceType::DlSlice,
        SliceType::UplinkSlice => pb::SliceType::UlSlice,
    }
}

fn slice_config_ie(config: &SliceConfig) -> pb::SliceConfig {
    pb::SliceConfig {
        slice_id: Some(pb::SliceId {
            value: config.slice_id,
        }),
        slice_config_parameters: Some(pb::SliceParameters {
            scheduler_type: scheduler_type_ie(config.scheduler_type) as i32,
            weight: Some(config.weight),
            qos_level: None,
        }),
        slice_type: slice_type_ie(config.slice_type) as i32,
    }
}

fn slice_associate_ie(association: &SliceAssociation) -> pb::SliceAssociate {
    let UeIdentity::DuUeF1apId(du_ue_f1ap_id) = association.ue_identity;

    pb::SliceAssociate {
        ue_id: Some(pb::UeIdentity {
            ue_identity: Some(pb::UeIdentityKind::DuUeF1apId(pb::DuUeF1apId {
                value: du_ue_f1ap_id,
            })),
        }),
        bearer_id: association.bearer_ids.iter().map(bearer_id_ie).collect(),
        down_link_slice_id: Some(pb::SliceIdassoc {
            value: association.downlink_slice_id,
        }),
        uplink_slice_id: association
            .uplink_slice_id
            .map(|value| pb::SliceIdassoc { value }),
    }
}

fn bearer_id_ie(bearer: &BearerId) -> pb::BearerId {
    let BearerId::FourGDrb { drb_id, qci } = *bearer;
    pb::BearerId {
        bearer_id: Some(pb::BearerIdKind::DrbId(pb::DrbId {
            drb_id: Some(pb::DrbIdKind::FourGdrbId(pb::FourGDrbId {
                value: drb_id,
                qci: Some(pb::Qci { value: qci }),
            })),
        })),
    }
}
