//! JSON over HTTP binding of the RSM operations

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use rsm_api::v1::{
    Ack, CreateSliceRequest, DeleteSliceRequest, GetSlicesRequest, GetUeSliceAssociationRequest,
    SetUeSliceAssociationRequest, UpdateSliceRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{Operation, RsmService};

pub const SLICES_PATH: &str = "/rsm/v1/slices";
pub const UE_SLICE_ASSOCIATIONS_PATH: &str = "/rsm/v1/ue-slice-associations";
pub const HEALTH_PATH: &str = "/healthz";
pub const METRICS_PATH: &str = "/metrics";

/// Failure ack returned when the body could not be read as a request
#[derive(Serialize)]
struct AckBody {
    ack: Ack,
}

/// hyper service entry point: one span per request, tagged with a request id
pub async fn handle(
    service: Arc<RsmService>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);

    async move {
        let body = match req.into_body().collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!("Failed to read request body: {}", e);
                return Ok(json_response(
                    StatusCode::BAD_REQUEST,
                    &AckBody {
                        ack: Ack::failure(format!("invalid request body - {}", e)),
                    },
                ));
            }
        };
        let response = dispatch(&service, &method, &path, body).await;
        debug!("Responded {}", response.status());
        Ok(response)
    }
    .instrument(span)
    .await
}

/// Route a request by method and path
pub async fn dispatch(
    service: &RsmService,
    method: &Method,
    path: &str,
    body: Bytes,
) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::POST, SLICES_PATH) => match parse_body::<CreateSliceRequest>(&body, false) {
            Ok(request) => ok_json(&service.create_slice(&request).await),
            Err(e) => invalid_body(service, Operation::CreateSlice, e),
        },
        (&Method::PUT, SLICES_PATH) => match parse_body::<UpdateSliceRequest>(&body, false) {
            Ok(request) => ok_json(&service.update_slice(&request).await),
            Err(e) => invalid_body(service, Operation::UpdateSlice, e),
        },
        (&Method::DELETE, SLICES_PATH) => match parse_body::<DeleteSliceRequest>(&body, false) {
            Ok(request) => ok_json(&service.delete_slice(&request).await),
            Err(e) => invalid_body(service, Operation::DeleteSlice, e),
        },
        (&Method::GET, SLICES_PATH) => match parse_body::<GetSlicesRequest>(&body, true) {
            Ok(request) => ok_json(&service.get_slices(&request).await),
            Err(e) => invalid_body(service, Operation::GetSlices, e),
        },
        (&Method::POST, UE_SLICE_ASSOCIATIONS_PATH) => {
            match parse_body::<SetUeSliceAssociationRequest>(&body, false) {
                Ok(request) => ok_json(&service.set_ue_slice_association(&request).await),
                Err(e) => invalid_body(service, Operation::SetUeSliceAssociation, e),
            }
        }
        (&Method::GET, UE_SLICE_ASSOCIATIONS_PATH) => {
            match parse_body::<GetUeSliceAssociationRequest>(&body, true) {
                Ok(request) => ok_json(&service.get_ue_slice_association(&request).await),
                Err(e) => invalid_body(service, Operation::GetUeSliceAssociation, e),
            }
        }
        (&Method::GET, HEALTH_PATH) => text_response(StatusCode::OK, "ok\n".to_string()),
        (&Method::GET, METRICS_PATH) => match service.metrics().gather() {
            Ok(text) => text_response(StatusCode::OK, text),
            Err(e) => {
                warn!("Failed to gather metrics: {}", e);
                text_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e))
            }
        },
        (_, SLICES_PATH) => method_not_allowed("GET, POST, PUT, DELETE"),
        (_, UE_SLICE_ASSOCIATIONS_PATH) => method_not_allowed("GET, POST"),
        (_, HEALTH_PATH) | (_, METRICS_PATH) => method_not_allowed("GET"),
        _ => text_response(StatusCode::NOT_FOUND, format!("Not Found: {}\n", path)),
    }
}

/// Query operations take their parameters from an optional body
fn parse_body<T>(body: &Bytes, allow_empty: bool) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if allow_empty && body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}

fn invalid_body(
    service: &RsmService,
    operation: Operation,
    err: serde_json::Error,
) -> Response<Full<Bytes>> {
    warn!("{} rejected: invalid request body - {}", operation, err);
    service
        .metrics()
        .record_request(operation.as_str(), "invalid_body");
    json_response(
        StatusCode::BAD_REQUEST,
        &AckBody {
            ack: Ack::failure(format!("invalid request body - {}", err)),
        },
    )
}

fn ok_json<T: Serialize>(value: &T) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, value)
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = Response::new(Full::new(Bytes::from(body)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => text_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", e)),
    }
}

fn text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    response
}

fn method_not_allowed(allow: &'static str) -> Response<Full<Bytes>> {
    let mut response = text_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed\n".to_string(),
    );
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static(allow));
    response
}
