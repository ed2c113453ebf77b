//! Time utilities

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{AppError, AppResult};

/// Parse a datetime string in ISO 8601 format
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Parse a date filter from a query string.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
/// Blank values are treated as absent.
pub fn parse_datetime_param(name: &str, value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Some(dt) = parse_datetime(raw) {
        return Ok(Some(dt));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "{} must be an RFC 3339 timestamp or a YYYY-MM-DD date",
                name
            ))
        })
}
