//! Article repository

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    constants::report_status,
    error::AppResult,
    models::{Article, ArticleListItem, ArticleSortField, ArticleStatus, Pagination, SortOrder},
    utils::escape_like,
};

/// Featured and not yet expired
const FEATURED_NOW: &str =
    "(a.is_featured AND (a.featured_until IS NULL OR a.featured_until > NOW()))";

const LIST_SELECT: &str = r#"
    SELECT
        a.id, a.title, a.category, a.price, a.currency, a.status,
        a.is_featured, a.featured_until, a.ai_score, a.ai_flags, a.view_count,
        a.author_id, u.username AS author_username,
        (
            SELECT COUNT(*) FROM user_reports r
            WHERE r.reported_article_id = a.id AND r.status IN ("#;

const LIST_FROM: &str = r#"))
        AS open_report_count,
        a.created_at, a.updated_at
    FROM articles a
    JOIN users u ON u.id = a.author_id"#;

/// Optional article filters; each set field adds one condition
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub status: Option<ArticleStatus>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub author_id: Option<Uuid>,
    pub search: Option<String>,
    /// `Some(true)` keeps flagged articles, `Some(false)` keeps unflagged ones
    pub ai_flagged: Option<bool>,
    pub ai_flag_threshold: f64,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl ArticleFilter {
    /// Append the WHERE clause for this filter (alias `a` for articles)
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");

        if let Some(status) = self.status {
            qb.push(" AND a.status = ").push_bind(status.as_str());
        }
        if let Some(category) = &self.category {
            qb.push(" AND a.category = ").push_bind(category.clone());
        }
        match self.is_featured {
            Some(true) => {
                qb.push(" AND ").push(FEATURED_NOW);
            }
            Some(false) => {
                qb.push(" AND NOT ").push(FEATURED_NOW);
            }
            None => {}
        }
        if let Some(min_price) = self.min_price {
            qb.push(" AND a.price >= ").push_bind(min_price);
        }
        if let Some(max_price) = self.max_price {
            qb.push(" AND a.price <= ").push_bind(max_price);
        }
        if let Some(author_id) = self.author_id {
            qb.push(" AND a.author_id = ").push_bind(author_id);
        }
        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            qb.push(" AND (a.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR a.description ILIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        match self.ai_flagged {
            Some(true) => {
                qb.push(" AND a.ai_score >= ").push_bind(self.ai_flag_threshold);
            }
            Some(false) => {
                qb.push(" AND (a.ai_score IS NULL OR a.ai_score < ")
                    .push_bind(self.ai_flag_threshold)
                    .push(")");
            }
            None => {}
        }
        if let Some(from) = self.created_from {
            qb.push(" AND a.created_at >= ").push_bind(from);
        }
        if let Some(to) = self.created_to {
            qb.push(" AND a.created_at <= ").push_bind(to);
        }
    }
}

/// Repository for article database operations
pub struct ArticleRepository;

impl ArticleRepository {
    /// Build the paginated list query
    pub fn list_query(
        filter: &ArticleFilter,
        sort_by: ArticleSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(LIST_SELECT);
        {
            let mut open = qb.separated(", ");
            for status in report_status::OPEN {
                open.push_bind(*status);
            }
        }
        qb.push(LIST_FROM);

        filter.push_conditions(&mut qb);

        qb.push(" ORDER BY ")
            .push(sort_by.as_column())
            .push(" ")
            .push(sort_order.as_sql())
            .push(" NULLS LAST, a.id ")
            .push(sort_order.as_sql());
        qb.push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());
        qb
    }

    /// Build the count query matching `list_query`
    pub fn count_query(filter: &ArticleFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM articles a");
        filter.push_conditions(&mut qb);
        qb
    }

    /// List articles with filters, sorting and pagination
    pub async fn list(
        pool: &PgPool,
        filter: &ArticleFilter,
        sort_by: ArticleSortField,
        sort_order: SortOrder,
        pagination: Pagination,
    ) -> AppResult<(Vec<ArticleListItem>, i64)> {
        let articles = Self::list_query(filter, sort_by, sort_order, pagination)
            .build_query_as::<ArticleListItem>()
            .fetch_all(pool)
            .await?;

        let total: i64 = Self::count_query(filter)
            .build_query_scalar()
            .fetch_one(pool)
            .await?;

        Ok((articles, total))
    }

    /// Find article by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(r#"SELECT * FROM articles WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(article)
    }

    /// Find and lock an article for the rest of the transaction
    pub async fn find_for_update(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Article>> {
        let article =
            sqlx::query_as::<_, Article>(r#"SELECT * FROM articles WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(article)
    }

    /// Lock several articles at once; missing ids are simply absent from the result
    pub async fn find_many_for_update(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> AppResult<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(
            r#"SELECT * FROM articles WHERE id = ANY($1) ORDER BY id FOR UPDATE"#,
        )
        .bind(ids)
        .fetch_all(conn)
        .await?;

        Ok(articles)
    }

    /// Mark an article approved
    pub async fn approve(conn: &mut PgConnection, id: &Uuid, admin_id: &Uuid) -> AppResult<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET status = $2,
                rejection_reason = NULL,
                reviewed_by = $3,
                reviewed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ArticleStatus::Approved.as_str())
        .bind(admin_id)
        .fetch_one(conn)
        .await?;

        Ok(article)
    }

    /// Mark an article rejected; a rejected article is never featured
    pub async fn reject(
        conn: &mut PgConnection,
        id: &Uuid,
        admin_id: &Uuid,
        reason: &str,
    ) -> AppResult<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET status = $2,
                rejection_reason = $4,
                is_featured = false,
                featured_until = NULL,
                reviewed_by = $3,
                reviewed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ArticleStatus::Rejected.as_str())
        .bind(admin_id)
        .bind(reason)
        .fetch_one(conn)
        .await?;

        Ok(article)
    }

    /// Set or clear featuring. `None` un-features the article.
    pub async fn set_featured(
        conn: &mut PgConnection,
        id: &Uuid,
        featured_until: Option<DateTime<Utc>>,
    ) -> AppResult<Article> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET is_featured = $2,
                featured_until = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(featured_until.is_some())
        .bind(featured_until)
        .fetch_one(conn)
        .await?;

        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql(qb: &QueryBuilder<'static, Postgres>) -> String {
        qb.sql().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_filter_has_no_conditions() {
        let qb = ArticleRepository::count_query(&ArticleFilter::default());
        assert_eq!(sql(&qb), "SELECT COUNT(*) FROM articles a WHERE TRUE");
    }

    #[test]
    fn test_filters_are_bound_in_order() {
        let filter = ArticleFilter {
            status: Some(ArticleStatus::Pending),
            category: Some("electronics".to_string()),
            min_price: Some(1000),
            max_price: Some(5000),
            search: Some("iphone".to_string()),
            ..ArticleFilter::default()
        };
        let qb = ArticleRepository::count_query(&filter);
        assert_eq!(
            sql(&qb),
            "SELECT COUNT(*) FROM articles a WHERE TRUE AND a.status = $1 \
             AND a.category = $2 AND a.price >= $3 AND a.price <= $4 \
             AND (a.title ILIKE $5 ESCAPE '\\' OR a.description ILIKE $6 ESCAPE '\\')"
        );
    }

    #[test]
    fn test_ai_flag_conditions() {
        let flagged = ArticleFilter {
            ai_flagged: Some(true),
            ai_flag_threshold: 0.7,
            ..ArticleFilter::default()
        };
        assert!(sql(&ArticleRepository::count_query(&flagged)).ends_with("AND a.ai_score >= $1"));

        let clean = ArticleFilter {
            ai_flagged: Some(false),
            ai_flag_threshold: 0.7,
            ..ArticleFilter::default()
        };
        assert!(
            sql(&ArticleRepository::count_query(&clean))
                .ends_with("AND (a.ai_score IS NULL OR a.ai_score < $1)")
        );
    }

    #[test]
    fn test_list_query_order_and_paging() {
        let filter = ArticleFilter {
            is_featured: Some(true),
            ..ArticleFilter::default()
        };
        let qb = ArticleRepository::list_query(
            &filter,
            ArticleSortField::Price,
            SortOrder::Asc,
            Pagination::new(Some(2), Some(10)),
        );
        let sql = sql(&qb);

        // $1 and $2 are the open report statuses in the subquery
        assert!(sql.contains("r.status IN ($1, $2)"));
        assert!(sql.contains(
            "WHERE TRUE AND (a.is_featured AND (a.featured_until IS NULL OR a.featured_until > NOW()))"
        ));
        assert!(sql.ends_with("ORDER BY a.price ASC NULLS LAST, a.id ASC LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn test_unfeatured_filter_includes_expired() {
        let filter = ArticleFilter {
            is_featured: Some(false),
            ..ArticleFilter::default()
        };
        assert_eq!(
            sql(&ArticleRepository::count_query(&filter)),
            "SELECT COUNT(*) FROM articles a WHERE TRUE AND NOT \
             (a.is_featured AND (a.featured_until IS NULL OR a.featured_until > NOW()))"
        );
    }
}
