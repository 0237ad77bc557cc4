//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config::APP_VERSION;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// `GET /health` — readiness check.
///
/// 200 once classifier, class table, and recommendation table are all
/// loaded; 503 otherwise (startup still running, or a required resource
/// failed to load).
pub async fn check(State(ctx): State<ApiContext>) -> Response {
    if ctx.state.ready() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                message: "Model and resources loaded.",
                version: APP_VERSION,
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "error",
                message: "Model or resources not loaded. Check startup logs.",
                version: APP_VERSION,
            }),
        )
            .into_response()
    }
}
