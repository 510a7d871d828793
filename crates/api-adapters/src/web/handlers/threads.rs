//! `/api/threads/{board}`

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};
use domains::{Thread, ThreadSummary};
use serde::Deserialize;

use super::plain_text;
use crate::web::{error::ApiResult, extract::Payload, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteThreadRequest {
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportThreadRequest {
    #[serde(default)]
    pub thread_id: String,
}

/// POST: the created thread, unredacted.
pub async fn create_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Payload(req): Payload<CreateThreadRequest>,
) -> ApiResult<Json<Thread>> {
    let result = state
        .threads
        .create_thread(&board, &req.text, &req.delete_password)
        .await;
    state.metrics.record_result("create_thread", &result);

    Ok(Json(result?))
}

/// GET: the board's front page.
pub async fn list_threads(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> ApiResult<Json<Vec<ThreadSummary>>> {
    let result = state.threads.list_threads(&board).await;
    state.metrics.record_result("list_threads", &result);

    Ok(Json(result?))
}

/// DELETE: plain text outcome.
pub async fn delete_thread(
    State(state): State<AppState>,
    Payload(req): Payload<DeleteThreadRequest>,
) -> Response {
    let result = state
        .threads
        .delete_thread(&req.thread_id, &req.delete_password)
        .await;
    plain_text(&state.metrics, "delete_thread", "error deleting thread", result)
}

/// PUT: plain text outcome.
pub async fn report_thread(
    State(state): State<AppState>,
    Payload(req): Payload<ReportThreadRequest>,
) -> Response {
    let result = state.threads.report_thread(&req.thread_id).await;
    plain_text(&state.metrics, "report_thread", "error reporting thread", result)
}
