use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use crate::AppState;

pub mod reports;

/// The full HTTP surface. Upload size is capped by `max_file_size`.
pub fn app(state: Arc<AppState>) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/health", get(health_check))
        .merge(reports::routes())
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
