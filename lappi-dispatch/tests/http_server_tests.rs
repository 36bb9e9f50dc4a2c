//! HTTP surface tests for lappi-dispatch
//!
//! Drive the full router in-process with `oneshot`; no sockets are opened.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use lappi_common::config::ExploringConfig;
use lappi_dispatch::exploring::ExploringSource;
use lappi_dispatch::{build_router, handler_fn, AppState, HandlerResponse};
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn create_test_state() -> AppState {
    AppState::new(ExploringConfig::default())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_router(create_test_state());

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "lappi-dispatch");
    assert_eq!(json["sources"], json!(["chatgpt", "discogs.com"]));
    assert_eq!(
        json["handlers"],
        json!([
            "check_connection",
            "exploring.sources.get_artist_description",
            "exploring.sources.list",
            "registry.set_values"
        ])
    );
}

#[tokio::test]
async fn test_check_connection_echoes_payload() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json("/make_request?key=check_connection", &json!({"foo": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"data": {"foo": 1}}));
}

#[tokio::test]
async fn test_null_result_returned_as_empty_response() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json("/make_request?key=check_connection", &Value::Null),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"data": {"empty_response": true}}));
}

#[tokio::test]
async fn test_set_values_then_source_constructible() {
    let state = create_test_state();
    let app = build_router(state.clone());

    let (status, json) = send(
        app,
        post_json(
            "/make_request?key=registry.set_values",
            &json!({"registryValues": {"exploring.sources.chatgpt.user_token": "abc"}}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"data": {"empty_response": true}}));
    assert_eq!(
        state.registry.get("exploring.sources.chatgpt.user_token").unwrap(),
        json!("abc")
    );

    let source = state.sources.create("chatgpt").unwrap();
    assert_eq!(source.source_name(), "chatgpt");
}

#[tokio::test]
async fn test_unknown_source_rejected() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json(
            "/make_request?key=exploring.sources.get_artist_description",
            &json!({"sourceName": "unknown-source", "artistName": "X"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "UNKNOWN_SOURCE");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unknown-source"));
}

#[tokio::test]
async fn test_source_without_credential_is_configuration_error() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json(
            "/make_request?key=exploring.sources.get_artist_description",
            &json!({"sourceName": "discogs.com", "artistName": "Daft Punk"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::PRECONDITION_FAILED);
    assert_eq!(json["error"]["code"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_unknown_handler_returns_not_found() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json("/make_request?key=no.such.handler", &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "UNKNOWN_HANDLER");
    assert_eq!(json["error"]["message"], "Unknown handler: no.such.handler");
}

#[tokio::test]
async fn test_missing_key_is_bad_request() {
    let app = build_router(create_test_state());

    let (status, json) = send(app, post_json("/make_request", &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = build_router(create_test_state());

    let request = Request::builder()
        .method("POST")
        .uri("/make_request?key=check_connection")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_payload_shape_rejected_by_handler() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json(
            "/make_request?key=exploring.sources.get_artist_description",
            &json!({"sourceName": "chatgpt"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_PAYLOAD");
}

#[tokio::test]
async fn test_list_sources() {
    let app = build_router(create_test_state());

    let (status, json) = send(
        app,
        post_json("/make_request?key=exploring.sources.list", &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"data": {"sources": ["chatgpt", "discogs.com"]}}));
}

#[tokio::test]
async fn test_custom_handler_registered_at_runtime() {
    let state = create_test_state();
    state.dispatcher.register_handler(
        "library.count",
        handler_fn(|payload: Value| async move {
            let items = payload["items"].as_array().map(|a| a.len()).unwrap_or(0);
            Ok(HandlerResponse::Data(json!({ "count": items })))
        }),
    );
    let app = build_router(state);

    let (status, json) = send(
        app,
        post_json("/make_request?key=library.count", &json!({"items": [1, 2, 3]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"data": {"count": 3}}));
}
