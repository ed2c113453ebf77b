//! Audit log response DTOs

use serde::Serialize;

use crate::models::AdminLog;

/// Paginated audit log
#[derive(Debug, Serialize)]
pub struct AdminLogListResponse {
    pub logs: Vec<AdminLog>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
