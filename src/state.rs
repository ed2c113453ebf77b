//! Application state management
//!
//! Shared between handlers and middleware via Axum's State extractor.
//! Redis is optional: without it rate limiting is off and stats are
//! computed on every request.

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::config::{Config, JwtConfig, ModerationConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    pub db: PgPool,

    /// Redis connection manager, absent when REDIS_URL is not configured
    pub redis: Option<ConnectionManager>,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, redis: Option<ConnectionManager>, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner { db, redis, config }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager, if Redis is enabled
    pub fn redis(&self) -> Option<ConnectionManager> {
        self.inner.redis.clone()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Token signing settings
    pub fn jwt(&self) -> &JwtConfig {
        &self.inner.config.jwt
    }

    /// Moderation thresholds and limits
    pub fn moderation(&self) -> &ModerationConfig {
        &self.inner.config.moderation
    }
}
