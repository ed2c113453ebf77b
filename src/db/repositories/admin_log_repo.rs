//! Admin log repository
//!
//! The audit trail is append-only: this repository inserts and reads, nothing else.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AdminLog, NewAdminLog, Pagination},
};

/// Optional audit log filters
#[derive(Debug, Clone, Default)]
pub struct AdminLogFilter {
    pub admin_id: Option<Uuid>,
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl AdminLogFilter {
    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(admin_id) = self.admin_id {
            qb.push(" AND l.admin_id = ").push_bind(admin_id);
        }
        if let Some(action) = &self.action {
            qb.push(" AND l.action = ").push_bind(action.clone());
        }
        if let Some(target_type) = &self.target_type {
            qb.push(" AND l.target_type = ").push_bind(target_type.clone());
        }
        if let Some(target_id) = self.target_id {
            qb.push(" AND l.target_id = ").push_bind(target_id);
        }
        if let Some(from) = self.created_from {
            qb.push(" AND l.created_at >= ").push_bind(from);
        }
        if let Some(to) = self.created_to {
            qb.push(" AND l.created_at <= ").push_bind(to);
        }
    }
}

/// Repository for admin log database operations
pub struct AdminLogRepository;

impl AdminLogRepository {
    /// Append an audit entry
    pub async fn insert(conn: &mut PgConnection, entry: &NewAdminLog<'_>) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO admin_logs (admin_id, action, target_type, target_id, details, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(entry.admin_id)
        .bind(entry.action)
        .bind(entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.details)
        .bind(entry.ip_address)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// List audit entries, newest first
    pub async fn list(
        pool: &PgPool,
        filter: &AdminLogFilter,
        pagination: Pagination,
    ) -> AppResult<(Vec<AdminLog>, i64)> {
        let mut qb = QueryBuilder::new(
            r#"
            SELECT
                l.id, l.admin_id, u.username AS admin_username, l.action,
                l.target_type, l.target_id, l.details, l.ip_address, l.created_at
            FROM admin_logs l
            JOIN users u ON u.id = l.admin_id"#,
        );
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY l.created_at DESC, l.id DESC LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let logs = qb.build_query_as::<AdminLog>().fetch_all(pool).await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM admin_logs l");
        filter.push_conditions(&mut count_qb);
        let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

        Ok((logs, total))
    }
}
