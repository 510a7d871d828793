//! `/api/replies/{board}`

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use domains::{Thread, ThreadView};
use serde::Deserialize;

use super::plain_text;
use crate::web::{error::ApiResult, extract::Payload, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateReplyRequest {
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    #[serde(default)]
    pub thread_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteReplyRequest {
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub reply_id: String,
    #[serde(default)]
    pub delete_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ReportReplyRequest {
    #[serde(default)]
    pub thread_id: String,
    #[serde(default)]
    pub reply_id: String,
}

/// POST: the bumped thread with the new reply, unredacted.
pub async fn create_reply(
    State(state): State<AppState>,
    Payload(req): Payload<CreateReplyRequest>,
) -> ApiResult<Json<Thread>> {
    let result = state
        .replies
        .create_reply(&req.thread_id, &req.text, &req.delete_password)
        .await;
    state.metrics.record_result("create_reply", &result);

    Ok(Json(result?))
}

/// GET `?thread_id=`: the whole thread, redacted. 404 if it does not exist.
pub async fn get_thread(
    State(state): State<AppState>,
    Query(query): Query<ThreadQuery>,
) -> ApiResult<Json<ThreadView>> {
    let result = state.replies.get_thread(&query.thread_id).await;
    state.metrics.record_result("get_thread", &result);

    Ok(Json(result?))
}

/// DELETE: plain text outcome.
pub async fn delete_reply(
    State(state): State<AppState>,
    Payload(req): Payload<DeleteReplyRequest>,
) -> Response {
    let result = state
        .replies
        .delete_reply(&req.thread_id, &req.reply_id, &req.delete_password)
        .await;
    plain_text(&state.metrics, "delete_reply", "error deleting reply", result)
}

/// PUT: plain text outcome.
pub async fn report_reply(
    State(state): State<AppState>,
    Payload(req): Payload<ReportReplyRequest>,
) -> Response {
    let result = state
        .replies
        .report_reply(&req.thread_id, &req.reply_id)
        .await;
    plain_text(&state.metrics, "report_reply", "error reporting reply", result)
}
