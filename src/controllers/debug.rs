use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{
    middleware::{method_not_allowed, preflight},
    services::diagnostics::{self, DebugReport},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/debug",
        get(debug_status).options(preflight).fallback(method_not_allowed),
    )
}

// GET /api/debug - всегда 200, сбои хранилищ описаны в теле
async fn debug_status(State(state): State<Arc<AppState>>) -> Json<DebugReport> {
    Json(diagnostics::debug_report(&state).await)
}
