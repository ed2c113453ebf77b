//! Article moderation response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Article, ArticleListItem, ReportListItem, UserBrief};

/// Paginated article list
#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleListItem>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// AI analysis block of an article detail
#[derive(Debug, Serialize)]
pub struct AiAnalysis {
    pub score: Option<f64>,
    pub flags: Vec<String>,
    pub summary: Option<String>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub flagged: bool,
}

impl AiAnalysis {
    pub fn from_article(article: &Article, threshold: f64) -> Self {
        Self {
            score: article.ai_score,
            flags: article.ai_flags.clone(),
            summary: article.ai_summary.clone(),
            analyzed_at: article.ai_analyzed_at,
            flagged: article.is_ai_flagged(threshold),
        }
    }
}

/// Full article view for moderators
#[derive(Debug, Serialize)]
pub struct ArticleDetailResponse {
    #[serde(flatten)]
    pub article: Article,
    pub author: Option<UserBrief>,
    pub reviewer_username: Option<String>,
    pub ai_analysis: AiAnalysis,
    /// Most recent reports against the article
    pub reports: Vec<ReportListItem>,
    pub report_total: i64,
}

/// Result of a bulk moderation request
#[derive(Debug, Default, Serialize)]
pub struct BulkModerationResponse {
    pub updated: Vec<Uuid>,
    pub skipped: Vec<SkippedArticle>,
}

/// An article the bulk action left untouched, and why
#[derive(Debug, Serialize)]
pub struct SkippedArticle {
    pub id: Uuid,
    pub reason: String,
}
