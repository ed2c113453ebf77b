//! Utility functions

pub mod time;
pub mod validation;

pub use time::{parse_datetime, parse_datetime_param};
pub use validation::{escape_like, non_empty, sanitize_string, validate_date_range, validate_reason};
