//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(timer_handler))
        .route("/timer/configure", post(configure_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/finish", post(finish_handler))
        .route("/history", get(history_handler).delete(clear_history_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(20554, "127.0.0.1".to_string(), 8.0, 10))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = create_router(test_state());
        let response = app.oneshot(request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn configure_then_start_countdown() {
        let state = test_state();

        let response = create_router(Arc::clone(&state))
            .oneshot(post_json(
                "/timer/configure",
                r#"{"mode":"countdown","duration_sec":45}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "idle");
        assert_eq!(json["timer"]["mode"], "countdown");

        let response = create_router(Arc::clone(&state))
            .oneshot(request("POST", "/timer/start"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "running");
        assert_eq!(json["timer"]["seconds"], 45);
        assert_eq!(json["timer"]["is_active"], true);
    }

    #[tokio::test]
    async fn invalid_configuration_is_a_bad_request() {
        let state = test_state();
        let app = create_router(Arc::clone(&state));

        let response = app
            .oneshot(post_json(
                "/timer/configure",
                r#"{"mode":"interval","work_sec":30,"rest_sec":10,"rounds":0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().unwrap().contains("rounds"));
        assert_eq!(state.get_snapshot().unwrap().mode, crate::workout::TimerMode::Stopwatch);
    }

    #[tokio::test]
    async fn pause_keeps_the_counter() {
        let state = test_state();
        state.start().unwrap();
        for _ in 0..7 {
            state.tick().unwrap();
        }

        let response = create_router(Arc::clone(&state))
            .oneshot(request("POST", "/timer/pause"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["timer"]["seconds"], 7);
        assert_eq!(json["timer"]["is_active"], false);
    }

    #[tokio::test]
    async fn finish_and_reset_stopwatch() {
        let state = test_state();
        state.start().unwrap();
        state.tick().unwrap();

        let response = create_router(Arc::clone(&state))
            .oneshot(request("POST", "/timer/finish"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "completed");
        assert_eq!(json["message"], "Session finished");

        let response = create_router(Arc::clone(&state))
            .oneshot(request("POST", "/timer/reset"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "idle");
        assert_eq!(json["timer"]["seconds"], 0);
    }

    #[tokio::test]
    async fn history_lists_and_clears() {
        let state = test_state();
        state.start().unwrap();
        state.tick().unwrap();
        state.finish().unwrap();
        let summary = state.timer.lock().unwrap().summary();
        state.record_session(summary).unwrap();

        let response = create_router(Arc::clone(&state))
            .oneshot(request("GET", "/history"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["records"].as_array().unwrap().len(), 1);
        assert_eq!(json["totals"]["sessions"], 1);

        let response = create_router(Arc::clone(&state))
            .oneshot(request("DELETE", "/history"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.get_history().unwrap().is_empty());
    }

    #[tokio::test]
    async fn status_reports_last_action() {
        let state = test_state();
        state.start().unwrap();

        let response = create_router(Arc::clone(&state))
            .oneshot(request("GET", "/status"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["last_action"], "start");
        assert_eq!(json["port"], 20554);
        assert_eq!(json["timer"]["is_active"], true);
    }
}
