use hyper::body::Bytes;
use hyper::{Method, StatusCode};
use rsm_api::v1::{
    Ack, CreateSliceRequest, SchedulerType, SetUeSliceAssociationRequest, SliceType, UeId,
    UeIdType,
};
use rsm_core::{
    BearerId, EnumPolicy, RequestRouter, RequestValidator, SchedulerType as CoreSchedulerType,
    SliceAssociation, SliceCommand, SliceConfig, SliceType as CoreSliceType, UeIdentity,
};
use rsm_e2::{decode_control_message, ControlPayload};
use rsm_northbound::http::{dispatch, SLICES_PATH};
use rsm_northbound::{RsmMetrics, RsmService};
use std::sync::Arc;
use std::time::Duration;

fn service(capacity: usize) -> RsmService {
    RsmService::new(
        RequestValidator::new(EnumPolicy::Coerce),
        Arc::new(RequestRouter::new(capacity, Duration::from_millis(100))),
        RsmMetrics::new().expect("Failed to create metrics"),
    )
}

#[tokio::test]
async fn test_create_slice_reaches_node_1() {
    let service = service(8);
    let mut node_1 = service.router().attach_node("node-1").await.unwrap();

    let resp = service
        .create_slice(&CreateSliceRequest {
            e2_node_id: "node-1".to_string(),
            slice_id: "5".to_string(),
            scheduler_type: SchedulerType::RoundRobin,
            weight: "20".to_string(),
            slice_type: SliceType::DlSlice,
        })
        .await;
    assert_eq!(resp.ack, Ack::ok());

    let message = node_1.recv().await.unwrap();
    assert!(!message.header().is_empty());
    assert!(!message.payload().is_empty());

    let decoded = decode_control_message(&message).unwrap();
    assert_eq!(decoded.command, SliceCommand::Create);
    assert_eq!(
        decoded.payload,
        ControlPayload::SliceCreate(SliceConfig {
            slice_id: 5,
            scheduler_type: CoreSchedulerType::RoundRobin,
            weight: 20,
            slice_type: CoreSliceType::DownlinkSlice,
        })
    );
}

#[tokio::test]
async fn test_unknown_scheduler_is_coerced() {
    let service = service(8);
    let mut node_1 = service.router().attach_node("node-1").await.unwrap();

    let body = Bytes::from_static(
        br#"{"e2NodeId":"node-1","sliceId":"3","schedulerType":42,"weight":"5","sliceType":1}"#,
    );
    let response = dispatch(&service, &Method::POST, SLICES_PATH, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let decoded = decode_control_message(&node_1.recv().await.unwrap()).unwrap();
    assert_eq!(
        decoded.payload,
        ControlPayload::SliceCreate(SliceConfig {
            slice_id: 3,
            scheduler_type: CoreSchedulerType::RoundRobin,
            weight: 5,
            slice_type: CoreSliceType::UplinkSlice,
        })
    );
}

#[tokio::test]
async fn test_ue_association_carries_default_bearer() {
    let service = service(8);
    let mut node_1 = service.router().attach_node("node-1").await.unwrap();

    let resp = service
        .set_ue_slice_association(&SetUeSliceAssociationRequest {
            e2_node_id: "node-1".to_string(),
            ue_id: vec![
                UeId::new("11", UeIdType::DuUeF1apId),
                UeId::new("7", UeIdType::RanUeNgapId),
                UeId::new("12", UeIdType::DuUeF1apId),
            ],
            dl_slice_id: "1".to_string(),
            ul_slice_id: "2".to_string(),
        })
        .await;
    assert_eq!(resp.ack, Ack::ok());

    let decoded = decode_control_message(&node_1.recv().await.unwrap()).unwrap();
    assert_eq!(decoded.command, SliceCommand::AssociateUe);
    assert_eq!(
        decoded.payload,
        ControlPayload::SliceAssociate(SliceAssociation {
            downlink_slice_id: 1,
            uplink_slice_id: Some(2),
            ue_identity: UeIdentity::DuUeF1apId(12),
            bearer_ids: vec![BearerId::FourGDrb { drb_id: 1, qci: 1 }],
        })
    );
}

#[tokio::test]
async fn test_full_channel_times_out_in_band() {
    let service = service(1);
    let _node_1 = service.router().attach_node("node-1").await.unwrap();

    let request = CreateSliceRequest {
        e2_node_id: "node-1".to_string(),
        slice_id: "1".to_string(),
        scheduler_type: SchedulerType::RoundRobin,
        weight: "1".to_string(),
        slice_type: SliceType::DlSlice,
    };
    assert!(service.create_slice(&request).await.ack.success);

    let resp = service.create_slice(&request).await;
    assert_eq!(
        resp.ack,
        Ack::failure(
            "failed to route the control message - timed out handing control message to e2 node node-1"
        )
    );
}

#[tokio::test]
async fn test_per_node_order_is_preserved() {
    let service = service(8);
    let mut node_1 = service.router().attach_node("node-1").await.unwrap();

    for slice_id in ["1", "2", "3"] {
        let resp = service
            .create_slice(&CreateSliceRequest {
                e2_node_id: "node-1".to_string(),
                slice_id: slice_id.to_string(),
                scheduler_type: SchedulerType::QosBased,
                weight: "1".to_string(),
                slice_type: SliceType::DlSlice,
            })
            .await;
        assert!(resp.ack.success);
    }

    for expected in 1..=3 {
        let decoded = decode_control_message(&node_1.recv().await.unwrap()).unwrap();
        match decoded.payload {
            ControlPayload::SliceCreate(config) => assert_eq!(config.slice_id, expected),
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
