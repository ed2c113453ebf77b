//! Admin notification handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Notification routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_notifications))
        .route("/read-all", post(handler::mark_all_read))
        .route("/{id}/read", post(handler::mark_read))
}
