//! User report repository

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Pagination, ReportListItem, ReportSortField, ReportStatus, SortOrder, UserReport},
};

const LIST_SELECT: &str = r#"
    SELECT
        r.id, r.reason, r.status, r.description,
        r.reporter_id, reporter.username AS reporter_username,
        r.reported_user_id, reported.username AS reported_username,
        r.reported_article_id, a.title AS reported_article_title,
        r.handled_by, handler.username AS handler_username,
        r.handled_at, r.created_at, r.updated_at
    FROM user_reports r
    JOIN users reporter ON reporter.id = r.reporter_id
    LEFT JOIN users reported ON reported.id = r.reported_user_id
    LEFT JOIN articles a ON a.id = r.reported_article_id
    LEFT JOIN users handler ON handler.id = r.handled_by"#;

/// Optional report filters
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub reason: Option<String>,
    pub reporter_id: Option<Uuid>,
    pub reported_user_id: Option<Uuid>,
    pub reported_article_id: Option<Uuid>,
    pub handled_by: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl ReportFilter {
    /// Append the WHERE clause for this filter (alias `r` for user_reports)
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(status) = self.status {
            qb.push(" AND r.status = ").push_bind(status.as_str());
        }
        if let Some(reason) = &self.reason {
            qb.push(" AND r.reason = ").push_bind(reason.clone());
        }
        if let Some(reporter_id) = self.reporter_id {
            qb.push(" AND r.reporter_id = ").push_bind(reporter_id);
        }
        if let Some(reported_user_id) = self.reported_user_id {
            qb.push(" AND r.reported_user_id = ").push_bind(reported_user_id);
        }
        if let Some(reported_article_id) = self.reported_article_id {
            qb.push(" AND r.reported_article_id = ").push_bind(reported_article_id);
        }
        if let Some(handled_by) = self.handled_by {
            qb.push(" AND r.handled_by = ").push_bind(handled_by);
        }
        if let Some(from) = self.created_from {
            qb.push(" AND r.created_at >= ").push_bind(from);
        }
        if let Some(to) = self.created_to {
            qb.push(" AND r.created_at <= ").push_bind(to);
        }
    }
}

/// Repository for user report database operations
pub struct ReportRepository;

impl ReportRepository {
    /// Build the paginated list query
    pub fn list_query(
        filter: &ReportFilter,
        sort_by: ReportSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(LIST_SELECT);
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY ")
            .push(sort_by.as_column())
            .push(" ")
            .push(sort_order.as_sql())
            .push(", r.id ")
            .push(sort_order.as_sql());
        qb.push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        qb
    }

    /// Build the count query matching `list_query`
    pub fn count_query(filter: &ReportFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM user_reports r");
        filter.push_conditions(&mut qb);
        qb
    }

    /// List reports with filters, sorting and pagination
    pub async fn list(
        pool: &PgPool,
        filter: &ReportFilter,
        sort_by: ReportSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<(Vec<ReportListItem>, i64)> {
        let reports = Self::list_query(filter, sort_by, sort_order, pagination)
            .build_query_as::<ReportListItem>()
            .fetch_all(pool)
            .await?;

        let total = Self::count(pool, filter).await?;

        Ok((reports, total))
    }

    /// Count reports matching a filter
    pub async fn count(pool: &PgPool, filter: &ReportFilter) -> AppResult<i64> {
        let total: i64 = Self::count_query(filter)
            .build_query_scalar()
            .fetch_one(pool)
            .await?;

        Ok(total)
    }

    /// Find report by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<UserReport>> {
        let report = sqlx::query_as::<_, UserReport>(r#"SELECT * FROM user_reports WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(report)
    }

    /// Find and lock a report for the rest of the transaction
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: &Uuid,
    ) -> AppResult<Option<UserReport>> {
        let report = sqlx::query_as::<_, UserReport>(
            r#"SELECT * FROM user_reports WHERE id = $1 FOR UPDATE"#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(report)
    }

    /// Reports filed against an article, newest first
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: &Uuid,
        limit: i64,
    ) -> AppResult<Vec<ReportListItem>> {
        let filter = ReportFilter {
            reported_article_id: Some(*article_id),
            ..ReportFilter::default()
        };
        let mut qb = QueryBuilder::new(LIST_SELECT);
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY r.created_at DESC LIMIT ").push_bind(limit);

        let reports = qb
            .build_query_as::<ReportListItem>()
            .fetch_all(pool)
            .await?;

        Ok(reports)
    }

    /// Count other reports against the same user or article
    pub async fn count_related(pool: &PgPool, report: &UserReport) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM user_reports
            WHERE id <> $1
                AND (reported_article_id = $2 OR reported_user_id = $3)
            "#,
        )
        .bind(report.id)
        .bind(report.reported_article_id)
        .bind(report.reported_user_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Move a report under investigation and assign it
    pub async fn mark_investigating(
        conn: &mut PgConnection,
        id: &Uuid,
        admin_id: &Uuid,
    ) -> AppResult<UserReport> {
        let report = sqlx::query_as::<_, UserReport>(
            r#"
            UPDATE user_reports
            SET status = $2, handled_by = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ReportStatus::Investigating.as_str())
        .bind(admin_id)
        .fetch_one(conn)
        .await?;

        Ok(report)
    }

    /// Close a report as resolved or dismissed
    pub async fn close(
        conn: &mut PgConnection,
        id: &Uuid,
        status: ReportStatus,
        admin_id: &Uuid,
        admin_notes: Option<&str>,
    ) -> AppResult<UserReport> {
        let report = sqlx::query_as::<_, UserReport>(
            r#"
            UPDATE user_reports
            SET status = $2,
                handled_by = $3,
                admin_notes = COALESCE($4, admin_notes),
                handled_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(admin_id)
        .bind(admin_notes)
        .fetch_one(conn)
        .await?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(qb: &QueryBuilder<'static, Postgres>) -> String {
        qb.sql().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_count_query_filters() {
        let filter = ReportFilter {
            status: Some(ReportStatus::Pending),
            reason: Some("fraud".to_string()),
            reported_article_id: Some(Uuid::nil()),
            ..ReportFilter::default()
        };
        assert_eq!(
            sql(&ReportRepository::count_query(&filter)),
            "SELECT COUNT(*) FROM user_reports r WHERE TRUE AND r.status = $1 \
             AND r.reason = $2 AND r.reported_article_id = $3"
        );
    }

    #[test]
    fn test_list_query_sort() {
        let qb = ReportRepository::list_query(
            &ReportFilter::default(),
            ReportSortField::Reason,
            SortOrder::Asc,
            Pagination::default(),
        );
        let sql = sql(&qb);
        assert!(sql.contains("LEFT JOIN users handler ON handler.id = r.handled_by WHERE TRUE"));
        assert!(sql.ends_with("ORDER BY r.reason ASC, r.id ASC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_date_range_filter() {
        let now = Utc::now();
        let filter = ReportFilter {
            created_from: Some(now - chrono::Duration::days(7)),
            created_to: Some(now),
            ..ReportFilter::default()
        };
        assert!(
            sql(&ReportRepository::count_query(&filter))
                .ends_with("AND r.created_at >= $1 AND r.created_at <= $2")
        );
    }
}
