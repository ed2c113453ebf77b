//! Report handling request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_ADMIN_NOTES_LENGTH, MAX_REASON_LENGTH},
    db::repositories::ReportFilter,
    error::{AppError, AppResult},
    models::{validate_report_reason, Pagination, ReportSortField, ReportStatus, SortOrder},
    utils::{non_empty, parse_datetime_param, validate_date_range},
};

/// Longest ban a report can impose (ten years)
const MAX_BAN_HOURS: i64 = 24 * 365 * 10;

/// Query parameters for listing reports
#[derive(Debug, Default, Deserialize)]
pub struct ListReportsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub reporter_id: Option<Uuid>,
    pub reported_user_id: Option<Uuid>,
    pub reported_article_id: Option<Uuid>,
    pub handled_by: Option<Uuid>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub sort_by: Option<ReportSortField>,
    pub sort_order: Option<SortOrder>,
}

impl ListReportsQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    /// Validate the raw query and turn it into a repository filter
    pub fn to_filter(&self) -> AppResult<ReportFilter> {
        let status = match non_empty(self.status.as_deref()) {
            Some(s) if s == "all" => None,
            Some(s) => Some(s.parse::<ReportStatus>()?),
            None => None,
        };

        let reason = match non_empty(self.reason.as_deref()) {
            Some(r) if r == "all" => None,
            Some(r) => {
                validate_report_reason(&r)?;
                Some(r)
            }
            None => None,
        };

        let created_from = parse_datetime_param("created_from", self.created_from.as_deref())?;
        let created_to = parse_datetime_param("created_to", self.created_to.as_deref())?;
        validate_date_range(created_from, created_to)?;

        Ok(ReportFilter {
            status,
            reason,
            reporter_id: self.reporter_id,
            reported_user_id: self.reported_user_id,
            reported_article_id: self.reported_article_id,
            handled_by: self.handled_by,
            created_from,
            created_to,
        })
    }
}

/// How a report is closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportResolution {
    Resolved,
    Dismissed,
}

impl ReportResolution {
    pub fn status(&self) -> ReportStatus {
        match self {
            Self::Resolved => ReportStatus::Resolved,
            Self::Dismissed => ReportStatus::Dismissed,
        }
    }
}

/// Follow-up taken against the report target when resolving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportAction {
    #[default]
    None,
    RemoveArticle,
    BanUser,
}

impl ReportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::RemoveArticle => "remove_article",
            Self::BanUser => "ban_user",
        }
    }
}

/// Handle (close) report request
#[derive(Debug, Deserialize, Validate)]
pub struct HandleReportRequest {
    pub resolution: ReportResolution,
    #[validate(length(max = MAX_ADMIN_NOTES_LENGTH))]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub action: ReportAction,
    /// Ban length in hours (None = permanent)
    #[validate(range(min = 1, max = MAX_BAN_HOURS))]
    pub ban_duration_hours: Option<i64>,
    #[validate(length(max = MAX_REASON_LENGTH))]
    pub ban_reason: Option<String>,
}

impl HandleReportRequest {
    /// Cross-field checks that `validate()` cannot express
    pub fn check_consistency(&self) -> AppResult<()> {
        if self.resolution == ReportResolution::Dismissed && self.action != ReportAction::None {
            return Err(AppError::Validation(
                "A dismissed report cannot carry an action".to_string(),
            ));
        }
        if self.action != ReportAction::BanUser
            && (self.ban_duration_hours.is_some() || self.ban_reason.is_some())
        {
            return Err(AppError::Validation(
                "Ban options are only valid with the ban_user action".to_string(),
            ));
        }
        Ok(())
    }
}
