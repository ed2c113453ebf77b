//! Audit log handlers

mod handler;
pub mod request;
pub mod response;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Audit log routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_logs))
}
