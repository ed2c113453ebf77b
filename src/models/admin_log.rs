//! Admin audit log model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only record of an admin-performed action
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLog {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub admin_username: String,
    pub action: String,
    pub target_type: String,
    pub target_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit entry about to be written
#[derive(Debug, Clone)]
pub struct NewAdminLog<'a> {
    pub admin_id: Uuid,
    pub action: &'a str,
    pub target_type: &'a str,
    pub target_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub ip_address: Option<&'a str>,
}
