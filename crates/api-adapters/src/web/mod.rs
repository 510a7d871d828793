//! # Web adapter
//!
//! The axum router for the message board API. Handlers only translate
//! between HTTP and the services; all rules live in `services`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{health, replies, threads};
pub use state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/threads/{board}",
            get(threads::list_threads)
                .post(threads::create_thread)
                .delete(threads::delete_thread)
                .put(threads::report_thread),
        )
        .route(
            "/api/replies/{board}",
            get(replies::get_thread)
                .post(replies::create_reply)
                .delete(replies::delete_reply)
                .put(replies::report_reply),
        )
        .route("/healthz", get(health::healthz))
        .route("/metrics", get(health::metrics))
        .layer(from_fn(middleware::security_headers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use storage_adapters::InMemoryThreadRepository;
    use tower::util::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Arc::new(InMemoryThreadRepository::new())))
    }

    #[tokio::test]
    async fn healthz_answers_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn form_encoded_thread_creation_is_accepted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/threads/b")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from("text=from+a+form&delete_password=pw"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["text"], "from a form");
        assert_eq!(json["board"], "b");
        assert_eq!(json["delete_password"], "pw");
    }

    #[tokio::test]
    async fn missing_text_is_a_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/threads/b")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"delete_password":"pw"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
