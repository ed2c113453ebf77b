//! Dashboard statistics service

use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::ModerationConfig,
    constants::TOP_CATEGORIES_LIMIT,
    db::repositories::{NotificationRepository, StatsRepository},
    error::AppResult,
    handlers::stats::response::{DashboardSnapshot, DashboardStatsResponse, TrendsResponse},
};

const DASHBOARD_CACHE_KEY: &str = "marketmod:stats:dashboard";

/// Statistics service
pub struct StatsService;

impl StatsService {
    /// Dashboard counters. The marketplace-wide part is cached in Redis when available;
    /// cache failures fall back to the database.
    pub async fn get_dashboard(
        pool: &PgPool,
        redis: Option<ConnectionManager>,
        moderation: &ModerationConfig,
        admin_id: &Uuid,
    ) -> AppResult<DashboardStatsResponse> {
        let snapshot = match redis {
            Some(mut redis) => match Self::read_cache(&mut redis).await {
                Some(snapshot) => snapshot,
                None => {
                    let snapshot = Self::compute_snapshot(pool, moderation).await?;
                    Self::write_cache(&mut redis, &snapshot, moderation.stats_cache_ttl_secs)
                        .await;
                    snapshot
                }
            },
            None => Self::compute_snapshot(pool, moderation).await?,
        };

        let unread_notifications = NotificationRepository::count_unread(pool, admin_id).await?;

        Ok(DashboardStatsResponse {
            snapshot,
            unread_notifications,
        })
    }

    /// Daily activity for the last `days` days and the busiest categories
    pub async fn get_trends(pool: &PgPool, days: u32) -> AppResult<TrendsResponse> {
        let daily = StatsRepository::daily_activity(pool, days as i32).await?;
        let top_categories = StatsRepository::top_categories(pool, TOP_CATEGORIES_LIMIT).await?;

        Ok(TrendsResponse {
            days,
            daily,
            top_categories,
        })
    }

    /// Drop the cached dashboard so the next read reflects a moderation change
    pub async fn invalidate(redis: Option<ConnectionManager>) {
        let Some(mut redis) = redis else {
            return;
        };

        if let Err(e) = redis.del::<_, ()>(DASHBOARD_CACHE_KEY).await {
            tracing::warn!(error = %e, "Failed to invalidate stats cache");
        }
    }

    async fn compute_snapshot(
        pool: &PgPool,
        moderation: &ModerationConfig,
    ) -> AppResult<DashboardSnapshot> {
        let articles = StatsRepository::article_stats(pool, moderation.ai_flag_threshold).await?;
        let reports = StatsRepository::report_stats(pool).await?;
        let users = StatsRepository::user_stats(pool).await?;

        Ok(DashboardSnapshot {
            articles,
            reports,
            users,
            generated_at: Utc::now(),
        })
    }

    async fn read_cache(redis: &mut ConnectionManager) -> Option<DashboardSnapshot> {
        let cached: Option<String> = match redis.get(DASHBOARD_CACHE_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Stats cache read failed");
                return None;
            }
        };

        cached.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed stats cache entry");
                None
            }
        })
    }

    async fn write_cache(redis: &mut ConnectionManager, snapshot: &DashboardSnapshot, ttl_secs: u64) {
        let raw = match serde_json::to_string(snapshot) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize stats snapshot");
                return;
            }
        };

        if let Err(e) = redis
            .set_ex::<_, _, ()>(DASHBOARD_CACHE_KEY, raw, ttl_secs)
            .await
        {
            tracing::warn!(error = %e, "Stats cache write failed");
        }
    }
}
