//! Article (marketplace listing) model

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{constants::article_status, error::AppError};

/// Article database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Price in minor currency units
    pub price: i64,
    pub currency: String,
    pub status: String,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub ai_score: Option<f64>,
    pub ai_flags: Vec<String>,
    pub ai_summary: Option<String>,
    pub ai_analyzed_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Parse the stored status string
    pub fn status(&self) -> Result<ArticleStatus, AppError> {
        self.status.parse()
    }

    /// Whether the AI analysis marks this article as risky
    pub fn is_ai_flagged(&self, threshold: f64) -> bool {
        self.ai_score.is_some_and(|score| score >= threshold)
    }
}

/// Article row for list views, joined with its author and open report count
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleListItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub price: i64,
    pub currency: String,
    pub status: String,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub ai_score: Option<f64>,
    pub ai_flags: Vec<String>,
    pub view_count: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub open_report_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Article lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Pending,
    Approved,
    Rejected,
    Sold,
    Archived,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => article_status::PENDING,
            Self::Approved => article_status::APPROVED,
            Self::Rejected => article_status::REJECTED,
            Self::Sold => article_status::SOLD,
            Self::Archived => article_status::ARCHIVED,
        }
    }

    /// Pending and previously rejected articles may be approved
    pub fn can_approve(&self) -> bool {
        matches!(self, Self::Pending | Self::Rejected)
    }

    /// Pending and live articles may be rejected
    pub fn can_reject(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Only live articles may be featured
    pub fn can_feature(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            article_status::PENDING => Ok(Self::Pending),
            article_status::APPROVED => Ok(Self::Approved),
            article_status::REJECTED => Ok(Self::Rejected),
            article_status::SOLD => Ok(Self::Sold),
            article_status::ARCHIVED => Ok(Self::Archived),
            other => Err(AppError::Validation(format!(
                "Invalid article status: {}. Valid statuses: {:?}",
                other,
                article_status::ALL
            ))),
        }
    }
}

/// Columns an article list may be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Price,
    Title,
    ViewCount,
    AiScore,
}

impl ArticleSortField {
    /// Qualified column name; the only way a sort column reaches SQL
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "a.created_at",
            Self::UpdatedAt => "a.updated_at",
            Self::Price => "a.price",
            Self::Title => "a.title",
            Self::ViewCount => "a.view_count",
            Self::AiScore => "a.ai_score",
        }
    }
}
