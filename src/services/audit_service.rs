//! Audit trail service
//!
//! Every state-changing moderation action writes exactly one [`AdminLog`] row
//! on the same connection as the change itself, so the entry commits or rolls
//! back together with it.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    db::repositories::{AdminLogFilter, AdminLogRepository},
    error::AppResult,
    models::{AdminLog, NewAdminLog, Pagination},
};

/// The admin performing a request, with the client address it came from
#[derive(Debug, Clone)]
pub struct Actor {
    pub admin_id: Uuid,
    pub ip_address: Option<String>,
}

impl Actor {
    pub fn new(admin_id: Uuid, ip_address: Option<String>) -> Self {
        Self {
            admin_id,
            ip_address,
        }
    }
}

/// Audit service
pub struct AuditService;

impl AuditService {
    /// Record an action inside the caller's transaction
    pub async fn record(
        conn: &mut PgConnection,
        actor: &Actor,
        action: &str,
        target_type: &str,
        target_id: Option<Uuid>,
        details: serde_json::Value,
    ) -> AppResult<Uuid> {
        let entry = NewAdminLog {
            admin_id: actor.admin_id,
            action,
            target_type,
            target_id,
            details,
            ip_address: actor.ip_address.as_deref(),
        };

        AdminLogRepository::insert(conn, &entry).await
    }

    /// List audit entries, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &AdminLogFilter,
        pagination: Pagination,
    ) -> AppResult<(Vec<AdminLog>, i64)> {
        AdminLogRepository::list(pool, filter, pagination).await
    }
}
