//! Article moderation request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_FEATURE_DAYS, MAX_REASON_LENGTH},
    db::repositories::ArticleFilter,
    error::{AppError, AppResult},
    models::{ArticleSortField, ArticleStatus, Pagination, SortOrder},
    utils::{non_empty, parse_datetime_param, validate_date_range},
};

const MAX_SEARCH_LENGTH: usize = 200;

/// Query parameters for listing articles
#[derive(Debug, Default, Deserialize)]
pub struct ListArticlesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub author_id: Option<Uuid>,
    pub search: Option<String>,
    pub ai_flagged: Option<bool>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub sort_by: Option<ArticleSortField>,
    pub sort_order: Option<SortOrder>,
}

impl ListArticlesQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    /// Validate the raw query and turn it into a repository filter
    pub fn to_filter(&self, ai_flag_threshold: f64) -> AppResult<ArticleFilter> {
        let status = match non_empty(self.status.as_deref()) {
            Some(s) if s == "all" => None,
            Some(s) => Some(s.parse::<ArticleStatus>()?),
            None => None,
        };

        for price in [self.min_price, self.max_price].into_iter().flatten() {
            if price < 0 {
                return Err(AppError::Validation("Prices cannot be negative".to_string()));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(AppError::Validation(
                    "min_price must not exceed max_price".to_string(),
                ));
            }
        }

        let search = non_empty(self.search.as_deref());
        if search.as_ref().is_some_and(|s| s.chars().count() > MAX_SEARCH_LENGTH) {
            return Err(AppError::Validation(format!(
                "search must be at most {} characters",
                MAX_SEARCH_LENGTH
            )));
        }

        let created_from = parse_datetime_param("created_from", self.created_from.as_deref())?;
        let created_to = parse_datetime_param("created_to", self.created_to.as_deref())?;
        validate_date_range(created_from, created_to)?;

        Ok(ArticleFilter {
            status,
            category: non_empty(self.category.as_deref()),
            is_featured: self.is_featured,
            min_price: self.min_price,
            max_price: self.max_price,
            author_id: self.author_id,
            search,
            ai_flagged: self.ai_flagged,
            ai_flag_threshold,
            created_from,
            created_to,
        })
    }
}

/// Approve article request (body optional)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ApproveArticleRequest {
    #[validate(length(max = MAX_REASON_LENGTH))]
    pub note: Option<String>,
}

/// Reject article request
#[derive(Debug, Deserialize, Validate)]
pub struct RejectArticleRequest {
    #[validate(length(min = 1, max = MAX_REASON_LENGTH))]
    pub reason: String,
}

/// Feature / un-feature article request
#[derive(Debug, Deserialize, Validate)]
pub struct FeatureArticleRequest {
    pub featured: bool,
    /// Days to keep the article featured; defaults to the configured value
    #[validate(range(min = 1, max = MAX_FEATURE_DAYS))]
    pub duration_days: Option<u32>,
}

/// Bulk moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Approve,
    Reject,
}

/// Bulk approve / reject request
#[derive(Debug, Deserialize, Validate)]
pub struct BulkModerationRequest {
    #[validate(length(min = 1))]
    pub ids: Vec<Uuid>,
    pub action: BulkAction,
    #[validate(length(max = MAX_REASON_LENGTH))]
    pub reason: Option<String>,
}
