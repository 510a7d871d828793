pub mod health;
pub mod replies;
pub mod threads;

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::metrics::Metrics;

/// Moderation endpoints answer with bare text. Expected outcomes ("incorrect
/// password", "thread not found", ...) are 200s; only a store failure turns
/// into a 500 carrying `failure`.
pub(crate) fn plain_text<O: Display>(
    metrics: &Metrics,
    operation: &'static str,
    failure: &'static str,
    result: domains::Result<O>,
) -> Response {
    match result {
        Ok(outcome) => {
            let message = outcome.to_string();
            metrics.record(operation, &message);
            (StatusCode::OK, message).into_response()
        }
        Err(err) => {
            tracing::error!(operation, error = %err, "moderation action failed");
            metrics.record(operation, err.kind());
            (StatusCode::INTERNAL_SERVER_ERROR, failure).into_response()
        }
    }
}
