//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use questlog_core::narration::NarrationGateway;
use questlog_core::record::RecordStore;
use questlog_core::rng::DeterministicRng;
use questlog_narrative::domain::extraction::TagPatternExtractor;
use questlog_narrative::gateway::NarrationBackends;
use questlog_store::MemoryRecordStore;
use questlog_test_support::{FixedClock, ScriptedGateway, SequenceRng};
use tower::ServiceExt;

use questlog_api::build_router;
use questlog_api::state::AppState;

/// Build the full app router over a fresh in-memory store, narrating every
/// turn with `reply`.
pub fn build_test_app(reply: &str) -> Router {
    build_test_app_with(
        Arc::new(MemoryRecordStore::new()),
        Arc::new(ScriptedGateway::new(reply)),
        SequenceRng::new(vec![]),
    )
}

/// Build the full app router with a custom store, gateway and `SequenceRng`.
pub fn build_test_app_with(
    store: Arc<dyn RecordStore>,
    gateway: Arc<dyn NarrationGateway>,
    rng: SequenceRng,
) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(
        Arc::new(FixedClock::standard()),
        rng,
        store,
        Arc::new(NarrationBackends::uniform(gateway)),
        Arc::new(TagPatternExtractor),
    );
    build_router(app_state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Create a character through the API and return its identifier.
pub async fn create_character(app: &Router, name: &str, class: &str) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/characters/create",
        &serde_json::json!({ "name": name, "class": class }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_owned()
}

/// Start a session through the API and return its identifier.
pub async fn start_session(app: &Router, character_id: &str) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/sessions/start",
        &serde_json::json!({ "character_id": character_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().unwrap().to_owned()
}
