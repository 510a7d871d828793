//! Helpers for driving the router in-process.
#![allow(dead_code)]

use std::sync::Arc;

use api_adapters::web::{router, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use domains::ThreadRepository;
use serde_json::{json, Value};
use storage_adapters::InMemoryThreadRepository;
use tower::util::ServiceExt;

pub fn app() -> Router {
    app_with(Arc::new(InMemoryThreadRepository::new()))
}

pub fn app_with(repo: Arc<dyn ThreadRepository>) -> Router {
    router(AppState::new(repo))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse { status, body }
}

/// Creates a thread and returns its id.
pub async fn create_thread(app: &Router, board: &str, text: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        &format!("/api/threads/{board}"),
        Some(json!({ "text": text, "delete_password": password })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["_id"].as_str().unwrap().to_string()
}

/// Appends a reply and returns the updated thread record.
pub async fn create_reply(
    app: &Router,
    board: &str,
    thread_id: &str,
    text: &str,
    password: &str,
) -> Value {
    let response = send(
        app,
        "POST",
        &format!("/api/replies/{board}"),
        Some(json!({ "thread_id": thread_id, "text": text, "delete_password": password })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()
}

/// Fails if `delete_password` or `reported` appears on a thread or any of its replies.
pub fn assert_redacted(thread: &Value) {
    assert!(thread.get("delete_password").is_none(), "thread leaks password");
    assert!(thread.get("reported").is_none(), "thread leaks report flag");
    for reply in thread["replies"].as_array().expect("replies array") {
        assert!(reply.get("delete_password").is_none(), "reply leaks password");
        assert!(reply.get("reported").is_none(), "reply leaks report flag");
    }
}
