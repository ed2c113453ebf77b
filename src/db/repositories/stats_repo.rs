//! Statistics repository

use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{ArticleStats, CategoryCount, DailyActivity, ReportStats, UserStats},
};

/// Repository for aggregate queries
pub struct StatsRepository;

impl StatsRepository {
    /// Article counters in a single pass
    pub async fn article_stats(pool: &PgPool, ai_flag_threshold: f64) -> AppResult<ArticleStats> {
        let stats = sqlx::query_as::<_, ArticleStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved,
                COUNT(*) FILTER (WHERE status = 'rejected') AS rejected,
                COUNT(*) FILTER (WHERE status = 'sold') AS sold,
                COUNT(*) FILTER (WHERE status = 'archived') AS archived,
                COUNT(*) FILTER (
                    WHERE is_featured AND (featured_until IS NULL OR featured_until > NOW())
                ) AS featured,
                COUNT(*) FILTER (WHERE ai_score >= $1) AS ai_flagged,
                COUNT(*) FILTER (WHERE created_at >= date_trunc('day', NOW())) AS created_today,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS created_this_week
            FROM articles
            "#,
        )
        .bind(ai_flag_threshold)
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    /// Report counters in a single pass
    pub async fn report_stats(pool: &PgPool) -> AppResult<ReportStats> {
        let stats = sqlx::query_as::<_, ReportStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'investigating') AS investigating,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE status = 'dismissed') AS dismissed,
                COUNT(*) FILTER (WHERE created_at >= date_trunc('day', NOW())) AS created_today,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS created_this_week
            FROM user_reports
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    /// User counters
    pub async fn user_stats(pool: &PgPool) -> AppResult<UserStats> {
        let stats = sqlx::query_as::<_, UserStats>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (
                    WHERE is_banned AND (ban_expires_at IS NULL OR ban_expires_at > NOW())
                ) AS banned
            FROM users
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(stats)
    }

    /// New articles and reports per day for the last `days` days, zero-filled
    pub async fn daily_activity(pool: &PgPool, days: i32) -> AppResult<Vec<DailyActivity>> {
        let activity = sqlx::query_as::<_, DailyActivity>(
            r#"
            WITH days AS (
                SELECT generate_series(
                    (NOW() AT TIME ZONE 'UTC')::date - ($1 - 1),
                    (NOW() AT TIME ZONE 'UTC')::date,
                    INTERVAL '1 day'
                )::date AS day
            )
            SELECT
                d.day,
                (
                    SELECT COUNT(*) FROM articles a
                    WHERE (a.created_at AT TIME ZONE 'UTC')::date = d.day
                ) AS new_articles,
                (
                    SELECT COUNT(*) FROM user_reports r
                    WHERE (r.created_at AT TIME ZONE 'UTC')::date = d.day
                ) AS new_reports
            FROM days d
            ORDER BY d.day
            "#,
        )
        .bind(days)
        .fetch_all(pool)
        .await?;

        Ok(activity)
    }

    /// Categories with the most articles
    pub async fn top_categories(pool: &PgPool, limit: i64) -> AppResult<Vec<CategoryCount>> {
        let categories = sqlx::query_as::<_, CategoryCount>(
            r#"
            SELECT category, COUNT(*) AS articles
            FROM articles
            GROUP BY category
            ORDER BY articles DESC, category
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }
}
