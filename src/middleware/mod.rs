use axum::{
    http::{header, HeaderName, Method, StatusCode},
    Json,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

// Заголовки, которые разрешала форма бронирования на старом хостинге
const ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];

/// CORS для всех маршрутов: любой Origin, preflight отвечает 200.
pub fn cors_layer() -> CorsLayer {
    let headers: Vec<HeaderName> = ALLOWED_HEADERS
        .iter()
        .map(|name| HeaderName::from_static(*name))
        .collect();

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(headers)
        .expose_headers([header::CONTENT_TYPE])
}

/// 200 на OPTIONS и для роутера, собранного без `cors_layer`.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback метода для всех API-маршрутов.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
