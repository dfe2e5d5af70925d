//! RSM northbound operations
//!
//! Every operation answers with an [`Ack`]. A well-formed call never fails at
//! the transport level: validation, encoding and routing problems are all
//! reported as `success == false` with a cause, so callers must inspect the
//! ack even when the call itself returned normally.

use rsm_api::v1::{
    Ack, CreateSliceRequest, CreateSliceResponse, DeleteSliceRequest, DeleteSliceResponse,
    GetSliceResponse, GetSlicesRequest, GetUeSliceAssociationRequest,
    GetUeSliceAssociationResponse, SetUeSliceAssociationRequest, SetUeSliceAssociationResponse,
    UpdateSliceRequest, UpdateSliceResponse,
};
use rsm_core::{RequestRouter, RequestValidator, SliceAssociation, SliceCommand, SliceConfig};
use rsm_e2::ControlMessageHandler;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{RsmError, RsmMetrics};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateSlice,
    UpdateSlice,
    DeleteSlice,
    SetUeSliceAssociation,
    GetSlices,
    GetUeSliceAssociation,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateSlice => "create_slice",
            Operation::UpdateSlice => "update_slice",
            Operation::DeleteSlice => "delete_slice",
            Operation::SetUeSliceAssociation => "set_ue_slice_association",
            Operation::GetSlices => "get_slices",
            Operation::GetUeSliceAssociation => "get_ue_slice_association",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slice management service: validate, encode, route
pub struct RsmService {
    validator: RequestValidator,
    encoder: ControlMessageHandler,
    router: Arc<RequestRouter>,
    metrics: RsmMetrics,
}

impl RsmService {
    pub fn new(validator: RequestValidator, router: Arc<RequestRouter>, metrics: RsmMetrics) -> Self {
        Self {
            validator,
            encoder: ControlMessageHandler::new(),
            router,
            metrics,
        }
    }

    pub fn router(&self) -> &Arc<RequestRouter> {
        &self.router
    }

    pub fn metrics(&self) -> &RsmMetrics {
        &self.metrics
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn create_slice(&self, request: &CreateSliceRequest) -> CreateSliceResponse {
        info!("Called {}: {:?}", Operation::CreateSlice, request);
        let result = match self.validator.create_slice(request) {
            Ok(config) => {
                self.dispatch(&request.e2_node_id, SliceCommand::Create, Some(&config), None)
                    .await
            }
            Err(e) => Err(e.into()),
        };
        CreateSliceResponse {
            ack: self.ack(Operation::CreateSlice, result),
        }
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn update_slice(&self, request: &UpdateSliceRequest) -> UpdateSliceResponse {
        info!("Called {}: {:?}", Operation::UpdateSlice, request);
        let result = match self.validator.update_slice(request) {
            Ok(config) => {
                self.dispatch(&request.e2_node_id, SliceCommand::Update, Some(&config), None)
                    .await
            }
            Err(e) => Err(e.into()),
        };
        UpdateSliceResponse {
            ack: self.ack(Operation::UpdateSlice, result),
        }
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn delete_slice(&self, request: &DeleteSliceRequest) -> DeleteSliceResponse {
        info!("Called {}: {:?}", Operation::DeleteSlice, request);
        let result = match self.validator.delete_slice(request) {
            Ok(config) => {
                self.dispatch(&request.e2_node_id, SliceCommand::Delete, Some(&config), None)
                    .await
            }
            Err(e) => Err(e.into()),
        };
        DeleteSliceResponse {
            ack: self.ack(Operation::DeleteSlice, result),
        }
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn set_ue_slice_association(
        &self,
        request: &SetUeSliceAssociationRequest,
    ) -> SetUeSliceAssociationResponse {
        info!("Called {}: {:?}", Operation::SetUeSliceAssociation, request);
        let result = match self.validator.ue_slice_association(request) {
            Ok(association) => {
                self.dispatch(
                    &request.e2_node_id,
                    SliceCommand::AssociateUe,
                    None,
                    Some(&association),
                )
                .await
            }
            Err(e) => Err(e.into()),
        };
        SetUeSliceAssociationResponse {
            ack: self.ack(Operation::SetUeSliceAssociation, result),
        }
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn get_slices(&self, request: &GetSlicesRequest) -> GetSliceResponse {
        info!("Called {}: {:?}", Operation::GetSlices, request);
        GetSliceResponse {
            ack: self.ack(Operation::GetSlices, Err(RsmError::NotImplemented)),
            slice_items: Vec::new(),
        }
    }

    #[instrument(skip_all, fields(e2_node_id = %request.e2_node_id))]
    pub async fn get_ue_slice_association(
        &self,
        request: &GetUeSliceAssociationRequest,
    ) -> GetUeSliceAssociationResponse {
        info!("Called {}: {:?}", Operation::GetUeSliceAssociation, request);
        GetUeSliceAssociationResponse {
            ack: self.ack(Operation::GetUeSliceAssociation, Err(RsmError::NotImplemented)),
            ue_slice_association: Vec::new(),
        }
    }

    async fn dispatch(
        &self,
        node_id: &str,
        command: SliceCommand,
        slice_config: Option<&SliceConfig>,
        slice_association: Option<&SliceAssociation>,
    ) -> Result<(), RsmError> {
        let message = self
            .encoder
            .create_control_request(command, slice_config, slice_association)?;

        match self.router.route(node_id, message).await {
            Ok(()) => {
                debug!("Routed {} to e2 node {}", command, node_id);
                self.metrics.record_routed(node_id);
                Ok(())
            }
            Err(e) => {
                self.metrics.record_route_failure(&e);
                Err(e.into())
            }
        }
    }

    fn ack(&self, operation: Operation, result: Result<(), RsmError>) -> Ack {
        match result {
            Ok(()) => {
                self.metrics.record_request(operation.as_str(), "ok");
                Ack::ok()
            }
            Err(e) => {
                warn!("{} failed: {}", operation, e);
                self.metrics.record_request(operation.as_str(), e.outcome());
                Ack::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsm_api::v1::{SchedulerType, SliceType, UeId, UeIdType};
    use rsm_core::EnumPolicy;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn service(policy: EnumPolicy) -> RsmService {
        let router = Arc::new(RequestRouter::new(4, Duration::from_millis(50)));
        RsmService::new(
            RequestValidator::new(policy),
            router,
            RsmMetrics::new().expect("Failed to create metrics"),
        )
    }

    fn create_request(node: &str, slice_id: &str, weight: &str) -> CreateSliceRequest {
        CreateSliceRequest {
            e2_node_id: node.to_string(),
            slice_id: slice_id.to_string(),
            scheduler_type: SchedulerType::RoundRobin,
            weight: weight.to_string(),
            slice_type: SliceType::DlSlice,
        }
    }

    #[tokio::test]
    async fn test_create_slice_routes_to_node() {
        let service = service(EnumPolicy::Coerce);
        let mut rx = service.router().attach_node("node-1").await.unwrap();

        let resp = service.create_slice(&create_request("node-1", "1", "10")).await;
        assert_eq!(resp.ack, Ack::ok());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let service = service(EnumPolicy::Coerce);
        let mut rx = service.router().attach_node("node-1").await.unwrap();

        let resp = service.create_slice(&create_request("node-1", "abc", "10")).await;
        assert!(!resp.ack.success);
        assert_eq!(
            resp.ack.cause,
            "failed to convert slice id to int - invalid digit found in string"
        );

        let resp = service.create_slice(&create_request("node-1", "1", "")).await;
        assert_eq!(
            resp.ack.cause,
            "failed to convert weight to int - cannot parse integer from empty string"
        );
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unknown_node_is_in_band() {
        let service = service(EnumPolicy::Coerce);
        let resp = service
            .delete_slice(&DeleteSliceRequest {
                e2_node_id: "node-7".to_string(),
                slice_id: "2".to_string(),
                slice_type: SliceType::UlSlice,
            })
            .await;
        assert!(!resp.ack.success);
        assert_eq!(
            resp.ack.cause,
            "failed to route the control message - unknown e2 node: node-7"
        );
    }

    #[tokio::test]
    async fn test_reject_policy() {
        let service = service(EnumPolicy::Reject);
        service.router().attach_node("node-1").await.unwrap();

        let resp = service
            .update_slice(&UpdateSliceRequest {
                e2_node_id: "node-1".to_string(),
                slice_id: "1".to_string(),
                scheduler_type: SchedulerType::Unrecognized("SCHEDULER_TYPE_EDF".to_string()),
                weight: "10".to_string(),
                slice_type: SliceType::DlSlice,
            })
            .await;
        assert_eq!(
            resp.ack,
            Ack::failure("unrecognized scheduler type SCHEDULER_TYPE_EDF")
        );
    }

    #[tokio::test]
    async fn test_ue_association_requires_du_id() {
        let service = service(EnumPolicy::Coerce);
        let mut rx = service.router().attach_node("node-1").await.unwrap();

        let mut request = SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![UeId::new("5", UeIdType::CuUeF1apId)],
            dl_slice_id: "1".to_string(),
            ul_slice_id: String::new(),
        };
        let resp = service.set_ue_slice_association(&request).await;
        assert_eq!(resp.ack, Ack::failure("need du-ue-f1ap-id"));

        request.ue_id.push(UeId::new("42", UeIdType::DuUeF1apId));
        let resp = service.set_ue_slice_association(&request).await;
        assert_eq!(resp.ack, Ack::ok());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_get_operations_not_implemented() {
        let service = service(EnumPolicy::Coerce);
        let slices = service.get_slices(&GetSlicesRequest::default()).await;
        assert_eq!(slices.ack, Ack::failure("not implemented yet"));
        assert!(slices.slice_items.is_empty());

        let assoc = service
            .get_ue_slice_association(&GetUeSliceAssociationRequest::default())
            .await;
        assert_eq!(assoc.ack.cause, "not implemented yet");
    }

    #[tokio::test]
    async fn test_request_metrics() {
        let service = service(EnumPolicy::Coerce);
        service.create_slice(&create_request("node-1", "1", "1")).await;

        let text = service.metrics().gather().unwrap();
        assert!(text.contains(
            r#"rsm_requests_total{operation="create_slice",outcome="routing_failed"} 1"#
        ));
        assert!(text.contains(r#"rsm_route_failures_total{reason="unknown_node"} 1"#));
    }

    #[tokio::test]
    async fn test_successful_call_logged_at_info() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = service(EnumPolicy::Coerce);
        let _rx = service.router().attach_node("node-1").await.unwrap();
        let resp = service.create_slice(&create_request("node-1", "5", "20")).await;
        assert!(resp.ack.success);

        let output = logs.contents();
        assert!(output.contains("Called create_slice"));
        assert!(output.contains(r#"slice_id: "5""#));
        assert!(!output.contains("Routed"));
    }
}
