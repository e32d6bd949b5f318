use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    error::ApiError,
    middleware::{method_not_allowed, preflight},
    models::SubmissionRequest,
    services::submission,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/submit",
        post(submit_form)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

// POST /api/submit
async fn submit_form(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let sheet = &state.config.sheets.submissions_sheet;
    submission::submit(state.sheets.as_ref(), sheet, request).await?;

    Ok(Json(json!({ "success": true, "message": "Success" })))
}
