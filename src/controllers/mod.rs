pub mod content;
pub mod debug;
pub mod submit;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(submit::routes())
        .merge(content::routes())
        .merge(debug::routes())
}
