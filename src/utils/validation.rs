//! Input validation utilities

use chrono::{DateTime, Utc};

use crate::{
    constants::MAX_REASON_LENGTH,
    error::{AppError, AppResult},
};

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trim an optional query value, treating blank as absent
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Escape `%`, `_` and `\` so user input matches literally in `LIKE ... ESCAPE '\'`
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Validate and sanitize a moderation reason (rejection reason, ban reason)
pub fn validate_reason(reason: &str) -> AppResult<String> {
    let sanitized = sanitize_string(reason);
    if sanitized.is_empty() {
        return Err(AppError::Validation("Reason cannot be empty".to_string()));
    }
    if sanitized.chars().count() as u64 > MAX_REASON_LENGTH {
        return Err(AppError::Validation(format!(
            "Reason must be at most {} characters",
            MAX_REASON_LENGTH
        )));
    }
    Ok(sanitized)
}

/// Ensure `from` is not after `to` when both are given
pub fn validate_date_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> AppResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if from > to => Err(AppError::Validation(
            "created_from must not be after created_to".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  fake\u{0007} item \n"), "fake item");
        assert_eq!(sanitize_string("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("iphone"), "iphone");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like(r"C:\temp"), r"C:\\temp");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(" phones ")), Some("phones".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_validate_reason() {
        assert_eq!(validate_reason("  Counterfeit goods ").unwrap(), "Counterfeit goods");
        assert!(validate_reason(" \t ").is_err());
        assert!(validate_reason(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let now = Utc::now();
        assert!(validate_date_range(Some(now - Duration::days(1)), Some(now)).is_ok());
        assert!(validate_date_range(Some(now), Some(now - Duration::days(1))).is_err());
        assert!(validate_date_range(None, Some(now)).is_ok());
    }
}
