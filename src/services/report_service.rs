//! Report handling service

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    constants::{admin_actions, notification_kinds, roles, target_types},
    db::repositories::{
        ArticleRepository, NotificationRepository, ReportFilter, ReportRepository, UserRepository,
    },
    error::{AppError, AppResult},
    handlers::reports::{
        request::{HandleReportRequest, ReportAction},
        response::{BannedUser, HandleReportResponse, ReportDetailResponse, ReportedArticle},
    },
    models::{
        ArticleStatus, Pagination, ReportListItem, ReportSortField, ReportStatus, SortOrder, User,
        UserReport,
    },
    services::audit_service::{Actor, AuditService},
    utils::{sanitize_string, validate_reason},
};

/// Report handling service
pub struct ReportService;

impl ReportService {
    /// List reports
    pub async fn list_reports(
        pool: &PgPool,
        filter: &ReportFilter,
        sort_by: ReportSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<(Vec<ReportListItem>, i64)> {
        ReportRepository::list(pool, filter, sort_by, sort_order, pagination).await
    }

    /// Get a report with the parties and article involved
    pub async fn get_report_detail(pool: &PgPool, id: &Uuid) -> AppResult<ReportDetailResponse> {
        let report = ReportRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let reporter = UserRepository::find_brief(pool, &report.reporter_id).await?;

        let reported_user = match report.reported_user_id {
            Some(user_id) => UserRepository::find_brief(pool, &user_id).await?,
            None => None,
        };

        let reported_article = match report.reported_article_id {
            Some(article_id) => ArticleRepository::find_by_id(pool, &article_id)
                .await?
                .map(ReportedArticle::from),
            None => None,
        };

        let handler_username = match report.handled_by {
            Some(handler_id) => UserRepository::find_brief(pool, &handler_id)
                .await?
                .map(|u| u.username),
            None => None,
        };

        let related_report_count = ReportRepository::count_related(pool, &report).await?;

        Ok(ReportDetailResponse {
            report,
            reporter,
            reported_user,
            reported_article,
            handler_username,
            related_report_count,
        })
    }

    /// Take a pending report under investigation
    pub async fn start_investigation(
        pool: &PgPool,
        actor: &Actor,
        id: &Uuid,
    ) -> AppResult<UserReport> {
        let mut tx = pool.begin().await?;

        let report = ReportRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let status = report.status()?;
        if status != ReportStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Report is {} and cannot be taken under investigation",
                status
            )));
        }

        let updated = ReportRepository::mark_investigating(&mut tx, id, &actor.admin_id).await?;

        AuditService::record(
            &mut tx,
            actor,
            admin_actions::INVESTIGATE_REPORT,
            target_types::REPORT,
            Some(*id),
            json!({ "previous_status": status.as_str() }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(admin_id = %actor.admin_id, report_id = %id, "Report under investigation");

        Ok(updated)
    }

    /// Close a report, optionally removing the article or banning the user.
    ///
    /// Everything happens in one transaction: the report row is locked first,
    /// and any failure leaves report, article, user and notifications untouched.
    pub async fn handle_report(
        pool: &PgPool,
        actor: &Actor,
        id: &Uuid,
        request: &HandleReportRequest,
    ) -> AppResult<HandleReportResponse> {
        request.check_consistency()?;

        let admin_notes = request
            .admin_notes
            .as_deref()
            .map(sanitize_string)
            .filter(|notes| !notes.is_empty());

        let mut tx = pool.begin().await?;

        let report = ReportRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        let previous_status = report.status()?;
        if !previous_status.is_open() {
            return Err(AppError::Conflict(format!(
                "Report is already {}",
                previous_status
            )));
        }

        let mut article_removed = false;
        let mut banned_user = None;

        match request.action {
            ReportAction::None => {}
            ReportAction::RemoveArticle => {
                article_removed = Self::remove_reported_article(&mut tx, actor, &report).await?;
            }
            ReportAction::BanUser => {
                let user = Self::ban_reported_user(&mut tx, actor, &report, request).await?;
                banned_user = Some(BannedUser::from(user));
            }
        }

        let resolution = request.resolution.status();
        let closed = ReportRepository::close(
            &mut tx,
            id,
            resolution,
            &actor.admin_id,
            admin_notes.as_deref(),
        )
        .await?;

        let notifications_cleared =
            NotificationRepository::mark_related_read(&mut tx, target_types::REPORT, id).await?;

        let action = match resolution {
            ReportStatus::Dismissed => admin_actions::DISMISS_REPORT,
            _ => admin_actions::RESOLVE_REPORT,
        };

        AuditService::record(
            &mut tx,
            actor,
            action,
            target_types::REPORT,
            Some(*id),
            json!({
                "previous_status": previous_status.as_str(),
                "resolution": resolution.as_str(),
                "action": request.action.as_str(),
                "article_id": report.reported_article_id,
                "article_removed": article_removed,
                "banned_user_id": banned_user.as_ref().map(|u| u.id),
                "ban_expires_at": banned_user.as_ref().and_then(|u| u.ban_expires_at),
                "admin_notes": admin_notes,
            }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            admin_id = %actor.admin_id,
            report_id = %id,
            resolution = %resolution,
            action = request.action.as_str(),
            "Report handled"
        );

        Ok(HandleReportResponse {
            report: closed,
            article_removed,
            banned_user,
            notifications_cleared,
        })
    }

    /// Take the reported article off the marketplace. Returns false when it was already rejected.
    async fn remove_reported_article(
        conn: &mut PgConnection,
        actor: &Actor,
        report: &UserReport,
    ) -> AppResult<bool> {
        let article_id = report.reported_article_id.ok_or_else(|| {
            AppError::Validation("Report does not reference an article".to_string())
        })?;

        let article = ArticleRepository::find_for_update(&mut *conn, &article_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reported article not found".to_string()))?;

        let status = article.status()?;
        if status == ArticleStatus::Rejected {
            return Ok(false);
        }
        if !status.can_reject() {
            return Err(AppError::Conflict(format!(
                "Article is {} and cannot be removed",
                status
            )));
        }

        let reason = format!("Removed following a {} report", report.reason);
        ArticleRepository::reject(conn, &article_id, &actor.admin_id, &reason).await?;

        Ok(true)
    }

    /// Ban the reported user, or the author of the reported article
    async fn ban_reported_user(
        conn: &mut PgConnection,
        actor: &Actor,
        report: &UserReport,
        request: &HandleReportRequest,
    ) -> AppResult<User> {
        let target_id = match (report.reported_user_id, report.reported_article_id) {
            (Some(user_id), _) => user_id,
            (None, Some(article_id)) => {
                ArticleRepository::find_for_update(&mut *conn, &article_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Reported article not found".to_string()))?
                    .author_id
            }
            (None, None) => {
                return Err(AppError::Validation(
                    "Report does not reference a user".to_string(),
                ));
            }
        };

        if target_id == actor.admin_id {
            return Err(AppError::Validation("Cannot ban yourself".to_string()));
        }

        let target = UserRepository::find_for_update(&mut *conn, &target_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reported user not found".to_string()))?;

        if target.role == roles::ADMIN {
            return Err(AppError::Forbidden(
                "Administrators cannot be banned through reports".to_string(),
            ));
        }

        let reason = match request.ban_reason.as_deref() {
            Some(reason) => validate_reason(reason)?,
            None => format!("Banned following a {} report", report.reason),
        };
        let expires_at = request
            .ban_duration_hours
            .map(|hours| Utc::now() + Duration::hours(hours));

        let user = UserRepository::ban(&mut *conn, &target_id, Some(&reason), expires_at).await?;

        let duration = match request.ban_duration_hours {
            Some(hours) => format!("for {} hours", hours),
            None => "permanently".to_string(),
        };
        NotificationRepository::create(
            conn,
            None,
            notification_kinds::USER_BANNED,
            "User banned",
            &format!(
                "{} was banned {} after report {}: {}",
                user.username, duration, report.id, reason
            ),
            Some(target_types::USER),
            Some(&user.id),
        )
        .await?;

        tracing::warn!(
            admin_id = %actor.admin_id,
            user_id = %user.id,
            report_id = %report.id,
            "User banned from report"
        );

        Ok(user)
    }
}
