//! Admin notification repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AdminNotification, Pagination},
};

/// Repository for admin notification database operations
pub struct NotificationRepository;

impl NotificationRepository {
    /// Create a notification; `admin_id = None` broadcasts to all admins
    pub async fn create(
        conn: &mut PgConnection,
        admin_id: Option<&Uuid>,
        kind: &str,
        title: &str,
        message: &str,
        related_type: Option<&str>,
        related_id: Option<&Uuid>,
    ) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO admin_notifications (admin_id, kind, title, message, related_type, related_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(admin_id)
        .bind(kind)
        .bind(title)
        .bind(message)
        .bind(related_type)
        .bind(related_id)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Notifications visible to an admin (own and broadcast), newest first
    pub async fn list_for_admin(
        pool: &PgPool,
        admin_id: &Uuid,
        unread_only: bool,
        pagination: Pagination,
    ) -> AppResult<(Vec<AdminNotification>, i64)> {
        let notifications = sqlx::query_as::<_, AdminNotification>(
            r#"
            SELECT * FROM admin_notifications
            WHERE (admin_id IS NULL OR admin_id = $1)
                AND (NOT $2 OR is_read = false)
            ORDER BY created_at DESC, id DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(admin_id)
        .bind(unread_only)
        .bind(pagination.offset())
        .bind(pagination.limit())
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM admin_notifications
            WHERE (admin_id IS NULL OR admin_id = $1)
                AND (NOT $2 OR is_read = false)
            "#,
        )
        .bind(admin_id)
        .bind(unread_only)
        .fetch_one(pool)
        .await?;

        Ok((notifications, total))
    }

    /// Count unread notifications visible to an admin
    pub async fn count_unread(pool: &PgPool, admin_id: &Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM admin_notifications
            WHERE (admin_id IS NULL OR admin_id = $1) AND is_read = false
            "#,
        )
        .bind(admin_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Mark one notification read. Returns false when it is not visible to the admin.
    pub async fn mark_read(pool: &PgPool, id: &Uuid, admin_id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE admin_notifications
            SET is_read = true, read_at = COALESCE(read_at, NOW())
            WHERE id = $1 AND (admin_id IS NULL OR admin_id = $2)
            "#,
        )
        .bind(id)
        .bind(admin_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread notification visible to an admin as read
    pub async fn mark_all_read(pool: &PgPool, admin_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE admin_notifications
            SET is_read = true, read_at = NOW()
            WHERE (admin_id IS NULL OR admin_id = $1) AND is_read = false
            "#,
        )
        .bind(admin_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark notifications about a given entity read (e.g. once a report is handled)
    pub async fn mark_related_read(
        conn: &mut PgConnection,
        related_type: &str,
        related_id: &Uuid,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE admin_notifications
            SET is_read = true, read_at = NOW()
            WHERE related_type = $1 AND related_id = $2 AND is_read = false
            "#,
        )
        .bind(related_type)
        .bind(related_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
