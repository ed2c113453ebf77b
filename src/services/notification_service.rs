//! Admin notification service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::NotificationRepository,
    error::{AppError, AppResult},
    models::{AdminNotification, Pagination},
};

/// Admin notification service
pub struct NotificationService;

impl NotificationService {
    /// List notifications visible to an admin, plus their unread count
    pub async fn list(
        pool: &PgPool,
        admin_id: &Uuid,
        unread_only: bool,
        pagination: Pagination,
    ) -> AppResult<(Vec<AdminNotification>, i64, i64)> {
        let (notifications, total) =
            NotificationRepository::list_for_admin(pool, admin_id, unread_only, pagination).await?;
        let unread = NotificationRepository::count_unread(pool, admin_id).await?;

        Ok((notifications, total, unread))
    }

    /// Mark a single notification read
    pub async fn mark_read(pool: &PgPool, id: &Uuid, admin_id: &Uuid) -> AppResult<()> {
        if !NotificationRepository::mark_read(pool, id, admin_id).await? {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }
        Ok(())
    }

    /// Mark everything visible to an admin read; returns how many changed
    pub async fn mark_all_read(pool: &PgPool, admin_id: &Uuid) -> AppResult<u64> {
        let updated = NotificationRepository::mark_all_read(pool, admin_id).await?;
        tracing::debug!(admin_id = %admin_id, updated, "Marked notifications read");
        Ok(updated)
    }
}
