use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::{
    error::ApiError,
    middleware::{method_not_allowed, preflight},
    models::{Event, GalleryItem, Mix},
    services::catalog,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/events",
            get(list_events).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/mixes",
            get(list_mixes).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/gallery",
            get(list_gallery).options(preflight).fallback(method_not_allowed),
        )
}

// GET /api/events
async fn list_events(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = catalog::list_events(&state).await?;
    tracing::debug!("Returning {} events", events.len());
    Ok(Json(events))
}

// GET /api/mixes
async fn list_mixes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Mix>>, ApiError> {
    Ok(Json(catalog::list_mixes(&state).await?))
}

// GET /api/gallery
async fn list_gallery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    Ok(Json(catalog::list_gallery(&state).await?))
}
