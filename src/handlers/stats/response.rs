//! Statistics response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ArticleStats, CategoryCount, DailyActivity, ReportStats, UserStats};

/// Marketplace-wide counters. This part is shared by all admins and cacheable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub articles: ArticleStats,
    pub reports: ReportStats,
    pub users: UserStats,
    pub generated_at: DateTime<Utc>,
}

/// Dashboard statistics response
#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    pub unread_notifications: i64,
}

/// Activity trends response
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub days: u32,
    pub daily: Vec<DailyActivity>,
    pub top_categories: Vec<CategoryCount>,
}
