//! User report model

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    constants::{report_reasons, report_status},
    error::AppError,
};

/// User report database model
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserReport {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub reported_user_id: Option<Uuid>,
    pub reported_article_id: Option<Uuid>,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub handled_by: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub handled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserReport {
    /// Parse the stored status string
    pub fn status(&self) -> Result<ReportStatus, AppError> {
        self.status.parse()
    }
}

/// Report row for list views, joined with the usernames and article title involved
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportListItem {
    pub id: Uuid,
    pub reason: String,
    pub status: String,
    pub description: Option<String>,
    pub reporter_id: Uuid,
    pub reporter_username: String,
    pub reported_user_id: Option<Uuid>,
    pub reported_username: Option<String>,
    pub reported_article_id: Option<Uuid>,
    pub reported_article_title: Option<String>,
    pub handled_by: Option<Uuid>,
    pub handler_username: Option<String>,
    pub handled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Investigating,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => report_status::PENDING,
            Self::Investigating => report_status::INVESTIGATING,
            Self::Resolved => report_status::RESOLVED,
            Self::Dismissed => report_status::DISMISSED,
        }
    }

    /// A report may be handled only while pending or under investigation
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Investigating)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            report_status::PENDING => Ok(Self::Pending),
            report_status::INVESTIGATING => Ok(Self::Investigating),
            report_status::RESOLVED => Ok(Self::Resolved),
            report_status::DISMISSED => Ok(Self::Dismissed),
            other => Err(AppError::Validation(format!(
                "Invalid report status: {}. Valid statuses: {:?}",
                other,
                report_status::ALL
            ))),
        }
    }
}

/// Validate a report reason filter value
pub fn validate_report_reason(reason: &str) -> Result<(), AppError> {
    if report_reasons::ALL.contains(&reason) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid report reason: {}. Valid reasons: {:?}",
            reason,
            report_reasons::ALL
        )))
    }
}

/// Columns a report list may be sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Status,
    Reason,
}

impl ReportSortField {
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "r.created_at",
            Self::UpdatedAt => "r.updated_at",
            Self::Status => "r.status",
            Self::Reason => "r.reason",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_statuses() {
        assert!(ReportStatus::Pending.is_open());
        assert!(ReportStatus::Investigating.is_open());
        assert!(!ReportStatus::Resolved.is_open());
        assert!(!ReportStatus::Dismissed.is_open());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("investigating".parse::<ReportStatus>().unwrap(), ReportStatus::Investigating);
        assert!("closed".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_reason_validation() {
        assert!(validate_report_reason("fraud").is_ok());
        assert!(validate_report_reason("counterfeit").is_ok());
        assert!(validate_report_reason("boring").is_err());
    }
}
