use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/averages", get(handlers::get_averages))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}
