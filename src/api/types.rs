//! Shared types for the API layer.

use std::sync::Arc;

use crate::state::AppState;

/// Shared context for all routes — the application state behind an `Arc`.
#[derive(Clone)]
pub struct ApiContext {
    pub state: Arc<AppState>,
}

impl ApiContext {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}
