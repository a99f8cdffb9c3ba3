//! Helpers shared by the integration tests

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use hr_server::db::seed;
use hr_server::{Config, DbService, ServerState, api};
use serde_json::Value;
use tower::ServiceExt;

/// State over a private in-memory database, seeded with demo data
pub async fn seeded_state() -> ServerState {
    let db = DbService::in_memory().await.unwrap();
    let state = ServerState::with_db(Config::default(), db);
    seed::seed_demo_data(&state.db, &state.engine).await.unwrap();
    state
}

pub fn app(state: &ServerState) -> Router {
    api::build_app(state).with_state(state.clone())
}

/// Send one request through the router and decode the JSON body (Null when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
