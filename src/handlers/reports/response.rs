//! Report handling response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Article, ReportListItem, User, UserBrief, UserReport};

/// Paginated report list
#[derive(Debug, Serialize)]
pub struct ReportListResponse {
    pub reports: Vec<ReportListItem>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// Article block embedded in a report detail
#[derive(Debug, Serialize)]
pub struct ReportedArticle {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub author_id: Uuid,
    pub price: i64,
    pub currency: String,
    pub is_featured: bool,
    pub ai_score: Option<f64>,
}

impl From<Article> for ReportedArticle {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            status: article.status,
            author_id: article.author_id,
            price: article.price,
            currency: article.currency,
            is_featured: article.is_featured,
            ai_score: article.ai_score,
        }
    }
}

/// Full report view for moderators
#[derive(Debug, Serialize)]
pub struct ReportDetailResponse {
    #[serde(flatten)]
    pub report: UserReport,
    pub reporter: Option<UserBrief>,
    pub reported_user: Option<UserBrief>,
    pub reported_article: Option<ReportedArticle>,
    pub handler_username: Option<String>,
    /// Other reports against the same user or article
    pub related_report_count: i64,
}

/// User banned while resolving a report
#[derive(Debug, Serialize)]
pub struct BannedUser {
    pub id: Uuid,
    pub username: String,
    pub ban_reason: Option<String>,
    pub ban_expires_at: Option<DateTime<Utc>>,
}

impl From<User> for BannedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            ban_reason: user.ban_reason,
            ban_expires_at: user.ban_expires_at,
        }
    }
}

/// Outcome of handling a report
#[derive(Debug, Serialize)]
pub struct HandleReportResponse {
    pub report: UserReport,
    pub article_removed: bool,
    pub banned_user: Option<BannedUser>,
    pub notifications_cleared: u64,
}
