//! Statistics request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{DEFAULT_TREND_DAYS, MAX_TREND_DAYS};

/// Query parameters for activity trends
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TrendsQuery {
    #[validate(range(min = 1, max = MAX_TREND_DAYS))]
    pub days: Option<u32>,
}

impl TrendsQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_TREND_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_default_and_bounds() {
        assert_eq!(TrendsQuery::default().days(), DEFAULT_TREND_DAYS);
        assert!(TrendsQuery { days: Some(0) }.validate().is_err());
        assert!(TrendsQuery { days: Some(91) }.validate().is_err());
        assert!(TrendsQuery { days: Some(7) }.validate().is_ok());
    }
}
