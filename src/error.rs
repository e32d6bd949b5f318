use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Ошибки обращения к внешним хранилищам (Google Sheets, Sanity).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("failed to sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// Превращает не-2xx ответ в `Upstream`, вытаскивая текст ошибки из тела.
    ///
    /// Google отдаёт `{"error": {"message": ...}}`, OAuth - `{"error_description": ...}`,
    /// Sanity - `{"error": {"description": ...}}` или `{"message": ...}`.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        StoreError::Upstream {
            status,
            message: extract_message(&body),
        }
    }
}

fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let candidates = [
        value.pointer("/error/message"),
        value.pointer("/error/description"),
        value.get("error_description"),
        value.get("message"),
        value.get("error"),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    message
}

/// Ошибка обработчика. При сбое хранилища клиент видит только общий текст,
/// подробности - в логах.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Тело запроса не JSON или без `Content-Type: application/json`.
    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal Server Error" })),
                )
                    .into_response()
            }
            ApiError::Body(rejection) => {
                tracing::warn!(error = %rejection, "rejected request body");
                (rejection.status(), Json(json!({ "error": rejection.body_text() }))).into_response()
            }
        }
    }
}
