//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.
//! Everything under `/admin` requires a valid token; each handler then
//! checks the admin role with [`require_admin`].

pub mod articles;
pub mod audit_logs;
pub mod auth;
pub mod extract;
pub mod health;
pub mod notifications;
pub mod reports;
pub mod stats;

use axum::{middleware, Router};

use crate::{
    error::{AppError, AppResult},
    middleware::{auth::auth_middleware, AuthenticatedUser},
    state::AppState,
};

/// Verify user is admin
pub(crate) fn require_admin(auth_user: &AuthenticatedUser) -> AppResult<()> {
    if !auth_user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}

/// Admin moderation routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::routes())
        .nest("/reports", reports::routes())
        .nest("/stats", stats::routes())
        .nest("/logs", audit_logs::routes())
        .nest("/notifications", notifications::routes())
}

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state.clone()))
        .nest(
            "/admin",
            admin_routes().route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}
