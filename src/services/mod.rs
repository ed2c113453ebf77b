//! Business logic services

pub mod article_service;
pub mod audit_service;
pub mod auth_service;
pub mod notification_service;
pub mod report_service;
pub mod stats_service;

pub use article_service::ArticleService;
pub use audit_service::{Actor, AuditService};
pub use auth_service::AuthService;
pub use notification_service::NotificationService;
pub use report_service::ReportService;
pub use stats_service::StatsService;
