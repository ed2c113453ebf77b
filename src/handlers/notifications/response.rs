//! Notification response DTOs

use serde::Serialize;

use crate::models::AdminNotification;

/// Paginated notifications with the caller's unread count
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<AdminNotification>,
    pub total: i64,
    pub unread: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Bulk mark-read result
#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
