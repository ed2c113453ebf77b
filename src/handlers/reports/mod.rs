//! Report handling handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Report handling routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_reports))
        .route("/{id}", get(handler::get_report))
        .route("/{id}/investigate", post(handler::investigate_report))
        .route("/{id}/handle", post(handler::handle_report))
}
