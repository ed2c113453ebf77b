//! Admin notification model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Notification shown in the admin panel. `admin_id = None` means broadcast.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminNotification {
    pub id: Uuid,
    pub admin_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_type: Option<String>,
    pub related_id: Option<Uuid>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
