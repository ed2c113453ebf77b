//! Article moderation handlers

mod handler;
pub mod request;
pub mod response;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Article moderation routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_articles))
        .route("/bulk", post(handler::bulk_moderate))
        .route("/{id}", get(handler::get_article))
        .route("/{id}/approve", post(handler::approve_article))
        .route("/{id}/reject", post(handler::reject_article))
        .route("/{id}/feature", post(handler::feature_article))
}
