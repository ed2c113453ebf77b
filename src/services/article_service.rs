//! Article moderation service

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::ModerationConfig,
    constants::{admin_actions, target_types, ARTICLE_DETAIL_REPORT_LIMIT},
    db::repositories::{ArticleFilter, ArticleRepository, ReportFilter, ReportRepository, UserRepository},
    error::{AppError, AppResult},
    handlers::articles::{
        request::{BulkAction, BulkModerationRequest, FeatureArticleRequest},
        response::{AiAnalysis, ArticleDetailResponse, BulkModerationResponse, SkippedArticle},
    },
    models::{Article, ArticleListItem, ArticleSortField, Pagination, SortOrder},
    services::audit_service::{Actor, AuditService},
    utils::validate_reason,
};

/// Article moderation service
pub struct ArticleService;

impl ArticleService {
    /// List articles for the moderation queue
    pub async fn list_articles(
        pool: &PgPool,
        filter: &ArticleFilter,
        sort_by: ArticleSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<(Vec<ArticleListItem>, i64)> {
        ArticleRepository::list(pool, filter, sort_by, sort_order, pagination).await
    }

    /// Get an article with author, reviewer, AI analysis and recent reports
    pub async fn get_article_detail(
        pool: &PgPool,
        id: &Uuid,
        ai_flag_threshold: f64,
    ) -> AppResult<ArticleDetailResponse> {
        let article = ArticleRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        let author = UserRepository::find_brief(pool, &article.author_id).await?;

        let reviewer_username = match article.reviewed_by {
            Some(reviewer_id) => UserRepository::find_brief(pool, &reviewer_id)
                .await?
                .map(|u| u.username),
            None => None,
        };

        let reports =
            ReportRepository::list_for_article(pool, id, ARTICLE_DETAIL_REPORT_LIMIT).await?;
        let report_total = ReportRepository::count(
            pool,
            &ReportFilter {
                reported_article_id: Some(*id),
                ..ReportFilter::default()
            },
        )
        .await?;

        let ai_analysis = AiAnalysis::from_article(&article, ai_flag_threshold);

        Ok(ArticleDetailResponse {
            article,
            author,
            reviewer_username,
            ai_analysis,
            reports,
            report_total,
        })
    }

    /// Approve a pending or previously rejected article
    pub async fn approve_article(
        pool: &PgPool,
        actor: &Actor,
        id: &Uuid,
        note: Option<&str>,
    ) -> AppResult<Article> {
        let mut tx = pool.begin().await?;

        let article = ArticleRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        let status = article.status()?;
        if !status.can_approve() {
            return Err(AppError::Conflict(format!(
                "Article is {} and cannot be approved",
                status
            )));
        }

        let updated = ArticleRepository::approve(&mut tx, id, &actor.admin_id).await?;

        AuditService::record(
            &mut tx,
            actor,
            admin_actions::APPROVE_ARTICLE,
            target_types::ARTICLE,
            Some(*id),
            json!({
                "previous_status": status.as_str(),
                "note": note,
            }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(admin_id = %actor.admin_id, article_id = %id, "Article approved");

        Ok(updated)
    }

    /// Reject a pending or live article. Rejection also ends any featuring.
    pub async fn reject_article(
        pool: &PgPool,
        actor: &Actor,
        id: &Uuid,
        reason: &str,
    ) -> AppResult<Article> {
        let reason = validate_reason(reason)?;

        let mut tx = pool.begin().await?;

        let article = ArticleRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        let status = article.status()?;
        if !status.can_reject() {
            return Err(AppError::Conflict(format!(
                "Article is {} and cannot be rejected",
                status
            )));
        }

        let updated = ArticleRepository::reject(&mut tx, id, &actor.admin_id, &reason).await?;

        AuditService::record(
            &mut tx,
            actor,
            admin_actions::REJECT_ARTICLE,
            target_types::ARTICLE,
            Some(*id),
            json!({
                "previous_status": status.as_str(),
                "reason": reason,
                "was_featured": article.is_featured,
            }),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(admin_id = %actor.admin_id, article_id = %id, "Article rejected");

        Ok(updated)
    }

    /// Feature an approved article for a number of days, or remove featuring
    pub async fn set_featured(
        pool: &PgPool,
        actor: &Actor,
        id: &Uuid,
        request: &FeatureArticleRequest,
        moderation: &ModerationConfig,
    ) -> AppResult<Article> {
        let mut tx = pool.begin().await?;

        let article = ArticleRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Article not found".to_string()))?;

        let (updated, action, details) = if request.featured {
            let status = article.status()?;
            if !status.can_feature() {
                return Err(AppError::Conflict(format!(
                    "Only approved articles can be featured (article is {})",
                    status
                )));
            }

            let days = request
                .duration_days
                .unwrap_or(moderation.default_feature_days);
            let until = Utc::now() + Duration::days(i64::from(days));
            let updated = ArticleRepository::set_featured(&mut tx, id, Some(until)).await?;

            (
                updated,
                admin_actions::FEATURE_ARTICLE,
                json!({ "duration_days": days, "featured_until": until }),
            )
        } else {
            let updated = ArticleRepository::set_featured(&mut tx, id, None).await?;

            (
                updated,
                admin_actions::UNFEATURE_ARTICLE,
                json!({ "was_featured": article.is_featured }),
            )
        };

        AuditService::record(
            &mut tx,
            actor,
            action,
            target_types::ARTICLE,
            Some(*id),
            details,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            admin_id = %actor.admin_id,
            article_id = %id,
            featured = request.featured,
            "Article featuring updated"
        );

        Ok(updated)
    }

    /// Approve or reject many articles in one transaction.
    ///
    /// Articles that are missing or whose status does not allow the action are
    /// reported back as skipped; the others are updated and logged individually.
    pub async fn bulk_moderate(
        pool: &PgPool,
        actor: &Actor,
        request: &BulkModerationRequest,
        max_bulk_ids: usize,
    ) -> AppResult<BulkModerationResponse> {
        let mut ids = request.ids.clone();
        ids.sort();
        ids.dedup();

        if ids.len() > max_bulk_ids {
            return Err(AppError::Validation(format!(
                "At most {} articles can be moderated at once",
                max_bulk_ids
            )));
        }

        let reason = match request.action {
            BulkAction::Reject => Some(validate_reason(
                request.reason.as_deref().ok_or_else(|| {
                    AppError::Validation("A reason is required to reject articles".to_string())
                })?,
            )?),
            BulkAction::Approve => None,
        };

        let mut tx = pool.begin().await?;

        let mut locked: HashMap<Uuid, Article> =
            ArticleRepository::find_many_for_update(&mut tx, &ids)
                .await?
                .into_iter()
                .map(|article| (article.id, article))
                .collect();

        let mut result = BulkModerationResponse::default();

        for id in ids {
            let Some(article) = locked.remove(&id) else {
                result.skipped.push(SkippedArticle {
                    id,
                    reason: "not found".to_string(),
                });
                continue;
            };

            let status = article.status()?;
            let allowed = match request.action {
                BulkAction::Approve => status.can_approve(),
                BulkAction::Reject => status.can_reject(),
            };
            if !allowed {
                result.skipped.push(SkippedArticle {
                    id,
                    reason: format!("article is {}", status),
                });
                continue;
            }

            let action = match (&request.action, &reason) {
                (BulkAction::Reject, Some(reason)) => {
                    ArticleRepository::reject(&mut tx, &id, &actor.admin_id, reason).await?;
                    admin_actions::REJECT_ARTICLE
                }
                _ => {
                    ArticleRepository::approve(&mut tx, &id, &actor.admin_id).await?;
                    admin_actions::APPROVE_ARTICLE
                }
            };

            AuditService::record(
                &mut tx,
                actor,
                action,
                target_types::ARTICLE,
                Some(id),
                json!({
                    "previous_status": status.as_str(),
                    "reason": reason,
                    "bulk": true,
                }),
            )
            .await?;

            result.updated.push(id);
        }

        tx.commit().await?;

        tracing::info!(
            admin_id = %actor.admin_id,
            updated = result.updated.len(),
            skipped = result.skipped.len(),
            "Bulk moderation applied"
        );

        Ok(result)
    }
}
