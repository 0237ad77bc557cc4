//! Application router.
//!
//! Three routes: the upload form, the readiness check, and the prediction
//! endpoint. CORS is permissive — the form may be hosted on another origin.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::endpoints::predict::MAX_UPLOAD_BYTES;
use crate::api::types::ApiContext;
use crate::state::AppState;

/// Build the application router over shared state.
pub fn app_router(state: Arc<AppState>) -> Router {
    let ctx = ApiContext::new(state);

    Router::new()
        .route("/", get(endpoints::home::index))
        .route("/health", get(endpoints::health::check))
        .route("/predict", post(endpoints::predict::predict))
        .with_state(ctx)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}
