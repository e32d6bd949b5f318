use tower_http::services::ServeDir;
use tracing::info;

use dj_booking_api::{config::Config, logging, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    logging::init(&config.app);

    info!("Starting DJ booking API");

    // Клиенты Sheets и Sanity живут всё время работы процесса
    let state = AppState::from_config(config.clone())?;

    let mut app = dj_booking_api::app(state);

    // Статика сайта отдаётся тем же процессом, если задан каталог
    if let Some(dir) = &config.app.static_dir {
        info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind((config.app.host.as_str(), config.app.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
