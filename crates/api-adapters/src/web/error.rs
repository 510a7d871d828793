//! JSON error responses for the endpoints that answer with records.
//!
//! The moderation endpoints answer in plain text instead; see
//! [`super::handlers::plain_text`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domains::DomainError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Domain(DomainError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Domain(DomainError::NotFound(entity, _)) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            ApiError::Domain(DomainError::Conflict(msg)) => {
                tracing::warn!("write conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    "thread was modified concurrently, try again".to_string(),
                )
            }
            ApiError::Domain(DomainError::Infrastructure(msg)) => {
                tracing::error!("store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
