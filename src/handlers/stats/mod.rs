//! Statistics handlers

mod handler;
pub mod request;
pub mod response;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Statistics routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::get_dashboard_stats))
        .route("/trends", get(handler::get_trends))
}
