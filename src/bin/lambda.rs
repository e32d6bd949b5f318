//! Lambda-адаптер: тот же роутер, что и у TCP-сервера, но один вызов на запрос.

use lambda_http::{run, Error};

use dj_booking_api::{config::Config, logging, AppState};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    logging::init(&config.app);

    let state = AppState::from_config(config)?;

    run(dj_booking_api::app(state)).await
}
