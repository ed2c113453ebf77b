//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

// =============================================================================
// MODERATION DEFAULTS
// =============================================================================

/// AI risk score at or above which an article counts as flagged
pub const DEFAULT_AI_FLAG_THRESHOLD: f64 = 0.7;

/// Default featuring period in days
pub const DEFAULT_FEATURE_DAYS: u32 = 7;

/// Longest featuring period an admin may request
pub const MAX_FEATURE_DAYS: u32 = 90;

/// Default cap on article ids per bulk moderation request
pub const DEFAULT_MAX_BULK_IDS: usize = 100;

/// Default lifetime of the cached dashboard statistics
pub const DEFAULT_STATS_CACHE_TTL_SECS: u64 = 60;

/// Longest trend window in days
pub const MAX_TREND_DAYS: u32 = 90;

/// Default trend window in days
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Reports shown on the article detail view
pub const ARTICLE_DETAIL_REPORT_LIMIT: i64 = 20;

/// Categories returned with the trends view
pub const TOP_CATEGORIES_LIMIT: i64 = 10;

/// Maximum rejection reason / admin notes length
pub const MAX_REASON_LENGTH: u64 = 1000;

/// Maximum admin notes length
pub const MAX_ADMIN_NOTES_LENGTH: u64 = 4000;

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const USER: &str = "user";
}

// =============================================================================
// ARTICLE STATUSES
// =============================================================================

/// Article lifecycle statuses
pub mod article_status {
    pub const PENDING: &str = "pending";
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const SOLD: &str = "sold";
    pub const ARCHIVED: &str = "archived";

    /// All article statuses
    pub const ALL: &[&str] = &[PENDING, APPROVED, REJECTED, SOLD, ARCHIVED];
}

// =============================================================================
// REPORT STATUSES AND REASONS
// =============================================================================

/// User report statuses
pub mod report_status {
    pub const PENDING: &str = "pending";
    pub const INVESTIGATING: &str = "investigating";
    pub const RESOLVED: &str = "resolved";
    pub const DISMISSED: &str = "dismissed";

    /// All report statuses
    pub const ALL: &[&str] = &[PENDING, INVESTIGATING, RESOLVED, DISMISSED];

    /// Statuses from which a report may still be handled
    pub const OPEN: &[&str] = &[PENDING, INVESTIGATING];
}

/// User report reasons
pub mod report_reasons {
    pub const SPAM: &str = "spam";
    pub const FRAUD: &str = "fraud";
    pub const INAPPROPRIATE: &str = "inappropriate";
    pub const COUNTERFEIT: &str = "counterfeit";
    pub const HARASSMENT: &str = "harassment";
    pub const OTHER: &str = "other";

    /// All report reasons
    pub const ALL: &[&str] = &[SPAM, FRAUD, INAPPROPRIATE, COUNTERFEIT, HARASSMENT, OTHER];
}

// =============================================================================
// AUDIT LOG
// =============================================================================

/// Admin log action identifiers
pub mod admin_actions {
    pub const APPROVE_ARTICLE: &str = "approve_article";
    pub const REJECT_ARTICLE: &str = "reject_article";
    pub const FEATURE_ARTICLE: &str = "feature_article";
    pub const UNFEATURE_ARTICLE: &str = "unfeature_article";
    pub const INVESTIGATE_REPORT: &str = "investigate_report";
    pub const RESOLVE_REPORT: &str = "resolve_report";
    pub const DISMISS_REPORT: &str = "dismiss_report";

    /// All recorded actions
    pub const ALL: &[&str] = &[
        APPROVE_ARTICLE,
        REJECT_ARTICLE,
        FEATURE_ARTICLE,
        UNFEATURE_ARTICLE,
        INVESTIGATE_REPORT,
        RESOLVE_REPORT,
        DISMISS_REPORT,
    ];
}

/// Admin log / notification target types
pub mod target_types {
    pub const ARTICLE: &str = "article";
    pub const REPORT: &str = "report";
    pub const USER: &str = "user";

    /// All target types
    pub const ALL: &[&str] = &[ARTICLE, REPORT, USER];
}

/// Admin notification kinds
pub mod notification_kinds {
    pub const USER_BANNED: &str = "user_banned";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Login endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Login endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Default admin API requests per minute
    pub const DEFAULT_ADMIN_PER_MINUTE: i64 = 120;
    /// Admin API - window in seconds
    pub const ADMIN_WINDOW_SECS: i64 = 60;
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;
