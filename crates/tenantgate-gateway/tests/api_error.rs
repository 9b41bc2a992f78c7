#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{http::StatusCode, response::IntoResponse};
use serde_json::{json, Value};

use tenantgate_core::error::ClientCode;
use tenantgate_core::GateError;
use tenantgate_gateway::config::Environment;
use tenantgate_gateway::error::ApiError;
use tenantgate_gateway::services::store::StoreError;

async fn body(res: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn production_hides_server_detail() {
    let err = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "pool exhausted")
        .with_detail("Timeout { after: 30s }");
    let res = err.render(Environment::Production);
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(res).await, json!({ "success": false, "error": "Server Error" }));
}

#[tokio::test]
async fn development_shows_message_and_stack() {
    let err = ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "pool exhausted")
        .with_detail("Timeout { after: 30s }");
    let v = body(err.render(Environment::Development)).await;
    assert_eq!(v["error"], json!("pool exhausted"));
    assert_eq!(v["stack"], json!("Timeout { after: 30s }"));
}

#[tokio::test]
async fn status_comes_from_the_error() {
    let res = ApiError::from(GateError::Conflict("taken".into())).into_response();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(body(res).await["error"], json!("taken"));

    let res = ApiError::from(GateError::Storage("disk full".into())).into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body(res).await["error"], json!("Server Error"));
}

#[tokio::test]
async fn panic_payload_becomes_detail() {
    let err = ApiError::from_panic(Box::new("boom"));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let v = body(err.render(Environment::Development)).await;
    assert_eq!(v["stack"], json!("boom"));
}

#[tokio::test]
async fn client_code_follows_the_error() {
    assert_eq!(ApiError::from(GateError::NotFound).code(), ClientCode::NotFound);
    assert_eq!(
        ApiError::from(GateError::Storage("disk full".into())).code(),
        ClientCode::Storage
    );
    assert_eq!(
        ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "too big").code(),
        ClientCode::BadRequest
    );
    assert_eq!(
        ApiError::from_panic(Box::new("boom")).code(),
        ClientCode::Internal
    );
}

#[tokio::test]
async fn client_errors_carry_no_stack() {
    let v = body(ApiError::from(GateError::NotFound).render(Environment::Development)).await;
    assert_eq!(v, json!({ "success": false, "error": "Not Found" }));
}

#[test]
fn store_errors_map_onto_gate_errors() {
    let dup = GateError::from(StoreError::DuplicateKey { key: "email".into() });
    assert_eq!(dup.client_code(), ClientCode::Conflict);

    let broken = GateError::from(StoreError::Storage("connection reset".into()));
    assert_eq!(broken.client_code(), ClientCode::Storage);
}
