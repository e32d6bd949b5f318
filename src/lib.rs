pub mod config;
pub mod controllers;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod sanity;
pub mod services;
pub mod sheets;

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    error::StoreError,
    sanity::{ContentStore, SanityClient},
    sheets::{RowStore, ServiceAccountAuth, SheetsClient},
};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sheets: Arc<dyn RowStore>,
    pub content: Arc<dyn ContentStore>,
}

impl AppState {
    /// Создаёт клиенты хранилищ один раз на процесс. Сеть здесь не трогается:
    /// отсутствующие учётные данные проявятся при первом запросе и в `/api/debug`.
    pub fn from_config(config: Config) -> Result<Arc<Self>, StoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30)) // Таймаут для HTTP-запросов.
            .build()?;

        let auth = Arc::new(ServiceAccountAuth::from_config(
            &config.sheets,
            http_client.clone(),
        ));
        let sheets = Arc::new(SheetsClient::from_config(
            &config.sheets,
            http_client.clone(),
            auth,
        ));
        let content = Arc::new(SanityClient::from_config(&config.sanity, http_client));

        Ok(Self::with_stores(config, sheets, content))
    }

    pub fn with_stores(
        config: Config,
        sheets: Arc<dyn RowStore>,
        content: Arc<dyn ContentStore>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            sheets,
            content,
        })
    }
}

/// Роутер API. Его обслуживают оба адаптера: TCP-сервер и Lambda.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
}
