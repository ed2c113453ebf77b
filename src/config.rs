//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::constants::{
    rate_limits, DEFAULT_AI_FLAG_THRESHOLD, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_FEATURE_DAYS, DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_MAX_BULK_IDS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_STATS_CACHE_TTL_SECS, MAX_FEATURE_DAYS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub moderation: ModerationConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    /// Admin API requests allowed per client per minute
    pub rate_limit_per_minute: i64,
    /// Rate limit on `X-Forwarded-For` / `X-Real-IP` instead of the socket peer.
    /// Only enable behind a reverse proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration. Without a URL, rate limiting and the stats cache are off.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: Option<String>,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Moderation behaviour tunables
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// `ai_score` at or above this value counts as flagged
    pub ai_flag_threshold: f64,
    /// Featuring period used when a request omits `duration_days`
    pub default_feature_days: u32,
    /// Upper bound on ids in one bulk request
    pub max_bulk_ids: usize,
    /// Lifetime of cached dashboard statistics
    pub stats_cache_ttl_secs: u64,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            ai_flag_threshold: DEFAULT_AI_FLAG_THRESHOLD,
            default_feature_days: DEFAULT_FEATURE_DAYS,
            max_bulk_ids: DEFAULT_MAX_BULK_IDS,
            stats_cache_ttl_secs: DEFAULT_STATS_CACHE_TTL_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            redis: RedisConfig::from_env(),
            jwt: JwtConfig::from_env()?,
            moderation: ModerationConfig::from_env()?,
        })
    }
}

/// Read an optional variable and parse it, falling back to `default`
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: parse_var("LOG_FORMAT", LogFormat::Pretty)?,
            rate_limit_per_minute: parse_var(
                "RATE_LIMIT_PER_MINUTE",
                rate_limits::DEFAULT_ADMIN_PER_MINUTE,
            )?,
            trust_proxy_headers: parse_var("TRUST_PROXY_HEADERS", false)?,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Self {
        Self {
            url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
        }
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: parse_var("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS)?,
        })
    }
}

impl ModerationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            ai_flag_threshold: parse_var("AI_FLAG_THRESHOLD", DEFAULT_AI_FLAG_THRESHOLD)?,
            default_feature_days: parse_var("DEFAULT_FEATURE_DAYS", DEFAULT_FEATURE_DAYS)?,
            max_bulk_ids: parse_var("MAX_BULK_IDS", DEFAULT_MAX_BULK_IDS)?,
            stats_cache_ttl_secs: parse_var("STATS_CACHE_TTL_SECS", DEFAULT_STATS_CACHE_TTL_SECS)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ai_flag_threshold) {
            return Err(ConfigError::InvalidValue("AI_FLAG_THRESHOLD".to_string()));
        }
        if self.default_feature_days == 0 || self.default_feature_days > MAX_FEATURE_DAYS {
            return Err(ConfigError::InvalidValue("DEFAULT_FEATURE_DAYS".to_string()));
        }
        if self.max_bulk_ids == 0 {
            return Err(ConfigError::InvalidValue("MAX_BULK_IDS".to_string()));
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
