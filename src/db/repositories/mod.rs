//! Database repositories
//!
//! Repositories handle all direct database interactions. Reads take the pool;
//! writes that belong to a moderation transaction take a `&mut PgConnection`
//! so callers can pass `&mut tx`.

pub mod admin_log_repo;
pub mod article_repo;
pub mod notification_repo;
pub mod report_repo;
pub mod stats_repo;
pub mod user_repo;

pub use admin_log_repo::{AdminLogFilter, AdminLogRepository};
pub use article_repo::{ArticleFilter, ArticleRepository};
pub use notification_repo::NotificationRepository;
pub use report_repo::{ReportFilter, ReportRepository};
pub use stats_repo::StatsRepository;
pub use user_repo::UserRepository;
