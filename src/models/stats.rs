//! Aggregated statistics rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Article counters for the dashboard
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ArticleStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub sold: i64,
    pub archived: i64,
    pub featured: i64,
    pub ai_flagged: i64,
    pub created_today: i64,
    pub created_this_week: i64,
}

/// Report counters for the dashboard
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct ReportStats {
    pub total: i64,
    pub pending: i64,
    pub investigating: i64,
    pub resolved: i64,
    pub dismissed: i64,
    pub created_today: i64,
    pub created_this_week: i64,
}

/// User counters for the dashboard
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct UserStats {
    pub total: i64,
    pub banned: i64,
}

/// New articles and reports on one calendar day (UTC)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day: NaiveDate,
    pub new_articles: i64,
    pub new_reports: i64,
}

/// Article count for one category
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub articles: i64,
}
